//! Spawned entity instances.

use crate::ai::MonsterAi;
use crate::character::Character;
use crate::template::{CLONE_SUFFIX, EntityTemplate, prefab_name};

/// One live, spawned occurrence of a template.
///
/// Components are owned copies taken from the template at spawn time, so
/// edits made to an instance never reach the template or other instances.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityInstance {
    pub name: String,
    pub ai: Option<MonsterAi>,
    pub character: Option<Character>,
}

impl EntityInstance {
    /// Create an instance from the current state of a template.
    ///
    /// Humanoid characters receive a copy of their default items.
    pub fn from_template(template: &EntityTemplate) -> Self {
        let mut character = template.character.clone();
        if let Some(humanoid) = character.as_mut().and_then(Character::as_humanoid_mut) {
            humanoid.give_default_items();
        }

        Self {
            name: format!("{}{}", template.name, CLONE_SUFFIX),
            ai: template.ai.clone(),
            character,
        }
    }

    /// Name of the template this instance was spawned from.
    pub fn template_name(&self) -> &str {
        prefab_name(&self.name)
    }
}
