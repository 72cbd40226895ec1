//! Character component: faction plus, for humanoids, carried items.

use crate::item::ItemData;
use crate::traits::Faction;

/// Items currently held by a humanoid instance.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub items: Vec<ItemData>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: ItemData) {
        self.items.push(item);
    }

    pub fn all_items(&self) -> &[ItemData] {
        &self.items
    }

    pub fn all_items_mut(&mut self) -> &mut [ItemData] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Humanoid-specific data: default loadout and live inventory.
///
/// Templates only carry `default_items`; the inventory of a template is
/// normally empty and is filled from the defaults when an instance spawns.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Humanoid {
    pub default_items: Vec<ItemData>,
    pub inventory: Inventory,
}

impl Humanoid {
    pub fn with_default_items(default_items: Vec<ItemData>) -> Self {
        Self {
            default_items,
            inventory: Inventory::empty(),
        }
    }

    /// Copies every default item into the inventory.
    pub fn give_default_items(&mut self) {
        for item in &self.default_items {
            self.inventory.add(item.clone());
        }
    }

    /// Returns true when the default loadout contains an equipable weapon.
    pub fn has_equipable_weapon(&self) -> bool {
        self.default_items
            .iter()
            .any(|item| item.is_weapon() && item.is_equipable())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

/// Character component attached to every creature.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub faction: Faction,

    /// Present only for characters that can hold items.
    #[cfg_attr(feature = "serde", serde(default))]
    pub humanoid: Option<Humanoid>,
}

impl Character {
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            humanoid: None,
        }
    }

    pub fn humanoid(faction: Faction, default_items: Vec<ItemData>) -> Self {
        Self {
            faction,
            humanoid: Some(Humanoid::with_default_items(default_items)),
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn as_humanoid(&self) -> Option<&Humanoid> {
        self.humanoid.as_ref()
    }

    pub fn as_humanoid_mut(&mut self) -> Option<&mut Humanoid> {
        self.humanoid.as_mut()
    }
}
