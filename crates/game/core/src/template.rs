//! Entity template definitions and oracle interface.
//!
//! This module provides `EntityTemplate` for defining every class of entity in
//! a data-driven way. Templates can be deserialized from RON catalogs and
//! spawned into [`EntityInstance`](crate::EntityInstance)s.
//!
//! The `TemplateOracle` trait allows runtime systems to enumerate the templates
//! the host currently has loaded.

use std::sync::{Arc, RwLock};

use crate::ai::MonsterAi;
use crate::character::Character;

/// Suffix the host appends to the name of every spawned instance.
pub const CLONE_SUFFIX: &str = "(Clone)";

/// Shared, mutable handle to a loaded template.
///
/// The host owns the strong reference. Consumers that must not keep a template
/// alive downgrade it to a `Weak` and re-validate before every mutation.
pub type TemplateRef = Arc<RwLock<EntityTemplate>>;

/// Shared definition for a class of entity.
///
/// Components are optional: heterogeneity among templates is expected, and
/// consumers skip templates that lack what they need.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityTemplate {
    pub name: String,

    /// Name of the template this one is a sub-part of. Root templates have none.
    pub parent: Option<String>,

    /// Autonomous behavior capability.
    pub ai: Option<MonsterAi>,

    pub character: Option<Character>,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_ai(mut self, ai: MonsterAi) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_character(mut self, character: Character) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub fn into_ref(self) -> TemplateRef {
        Arc::new(RwLock::new(self))
    }
}

/// Oracle providing the currently loaded template universe.
pub trait TemplateOracle {
    /// Enumerates every loaded template, root or not, in no particular order.
    fn templates(&self) -> Vec<TemplateRef>;
}

/// Resolves the root template name of a spawned instance.
///
/// Spawned instances are named after their template with a `(Clone)` suffix;
/// template names pass through unchanged.
pub fn prefab_name(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed
        .strip_suffix(CLONE_SUFFIX)
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefab_name_strips_clone_suffix() {
        assert_eq!(prefab_name("Deathsquito(Clone)"), "Deathsquito");
        assert_eq!(prefab_name("Greydwarf (Clone)"), "Greydwarf");
        assert_eq!(prefab_name("Troll"), "Troll");
        assert_eq!(prefab_name("  Neck "), "Neck");
    }

    #[test]
    fn root_and_capability() {
        let root = EntityTemplate::new("Boar").with_ai(MonsterAi::default());
        assert!(root.is_root());
        assert!(root.has_ai());

        let part = EntityTemplate::new("Boar_ragdoll").with_parent("Boar");
        assert!(!part.is_root());
        assert!(!part.has_ai());
    }
}
