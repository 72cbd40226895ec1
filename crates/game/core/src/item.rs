//! Item definitions carried by humanoid characters.
//!
//! Item data is plain owned data: templates keep their default items and every
//! spawned instance receives its own copy, so per-instance edits never reach the
//! template or sibling instances.

/// Item category; decides whether an item is a weapon and whether it can be
/// equipped.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ItemType {
    #[default]
    None,
    Material,
    Consumable,
    OneHandedWeapon,
    Bow,
    Shield,
    Helmet,
    Chest,
    Ammo,
    Customization,
    Legs,
    Hands,
    Trophy,
    TwoHandedWeapon,
    Torch,
    Misc,
    Shoulder,
    Utility,
    Tool,
    AttachAtgeir,
    Fish,
    TwoHandedWeaponLeft,
    AmmoNonEquipable,
    Trinket,
}

impl ItemType {
    /// Returns true for item types the AI attacks with.
    pub fn is_weapon(&self) -> bool {
        matches!(
            self,
            ItemType::OneHandedWeapon
                | ItemType::Bow
                | ItemType::TwoHandedWeapon
                | ItemType::TwoHandedWeaponLeft
                | ItemType::Torch
        )
    }

    /// Returns true for item types that occupy an equipment slot.
    pub fn is_equipable(&self) -> bool {
        matches!(
            self,
            ItemType::Tool
                | ItemType::OneHandedWeapon
                | ItemType::TwoHandedWeapon
                | ItemType::TwoHandedWeaponLeft
                | ItemType::Bow
                | ItemType::Shield
                | ItemType::Helmet
                | ItemType::Chest
                | ItemType::Legs
                | ItemType::Shoulder
                | ItemType::Ammo
                | ItemType::Torch
                | ItemType::Utility
                | ItemType::Trinket
        )
    }
}

/// Data shared by every copy of an item definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedItemData {
    pub item_type: ItemType,

    /// Seconds the AI waits before using this item's attack again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai_attack_interval: f32,
}

/// One item held by a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    pub name: String,
    pub shared: SharedItemData,
}

impl ItemData {
    pub fn new(name: impl Into<String>, item_type: ItemType, ai_attack_interval: f32) -> Self {
        Self {
            name: name.into(),
            shared: SharedItemData {
                item_type,
                ai_attack_interval,
            },
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.shared.item_type.is_weapon()
    }

    pub fn is_equipable(&self) -> bool {
        self.shared.item_type.is_equipable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapons_are_equipable() {
        for item_type in [
            ItemType::OneHandedWeapon,
            ItemType::Bow,
            ItemType::TwoHandedWeapon,
            ItemType::TwoHandedWeaponLeft,
            ItemType::Torch,
        ] {
            assert!(item_type.is_weapon(), "{item_type} should be a weapon");
            assert!(item_type.is_equipable(), "{item_type} should be equipable");
        }
    }

    #[test]
    fn gear_and_materials() {
        assert!(!ItemType::Shield.is_weapon());
        assert!(ItemType::Shield.is_equipable());
        assert!(!ItemType::Material.is_weapon());
        assert!(!ItemType::Material.is_equipable());
        assert!(!ItemType::AttachAtgeir.is_equipable());
    }
}
