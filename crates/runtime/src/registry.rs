//! Discovery of the templates eligible for tuning.
use std::collections::BTreeSet;

use game_core::{TemplateOracle, TemplateRef};
use tracing::{debug, warn};

/// Selects root templates that carry a behavior controller.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    ignored: BTreeSet<String>,
}

impl EntityRegistry {
    pub fn new(ignored: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// Enumerate eligible templates in the oracle's order.
    ///
    /// Templates that are nested parts of another template, have no
    /// behavior controller, or are on the blocklist are skipped.
    pub fn discover(&self, oracle: &dyn TemplateOracle) -> Vec<TemplateRef> {
        let candidates = oracle.templates();
        let total = candidates.len();

        let eligible: Vec<TemplateRef> = candidates
            .into_iter()
            .filter(|template| {
                let Ok(guard) = template.read() else {
                    warn!(target: "runtime::registry", "Skipping template with poisoned lock");
                    return false;
                };
                if self.is_ignored(&guard.name) {
                    debug!(target: "runtime::registry", template = %guard.name, "Template is blocklisted");
                    return false;
                }
                guard.is_root() && guard.has_ai()
            })
            .collect();

        debug!(
            target: "runtime::registry",
            total,
            eligible = eligible.len(),
            "Discovered templates"
        );
        eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EntityTemplate, MonsterAi, TemplateStore};

    fn store() -> TemplateStore {
        TemplateStore::from_templates([
            EntityTemplate::new("Troll").with_ai(MonsterAi::default()),
            EntityTemplate::new("TheHive").with_ai(MonsterAi::default()),
            EntityTemplate::new("Troll_ragdoll")
                .with_parent("Troll")
                .with_ai(MonsterAi::default()),
            EntityTemplate::new("Rock"),
        ])
    }

    #[test]
    fn discover_filters_nested_blocklisted_and_inert_templates() {
        let registry = EntityRegistry::new(["TheHive"]);
        let found = registry.discover(&store());

        let names: Vec<String> = found
            .iter()
            .map(|template| template.read().unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["Troll".to_string()]);
    }

    #[test]
    fn empty_blocklist_admits_everything_with_ai() {
        let registry = EntityRegistry::default();
        assert_eq!(registry.discover(&store()).len(), 2);
    }
}
