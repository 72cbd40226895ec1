//! In-memory host implementing [`TemplateOracle`].
use std::collections::BTreeMap;

use crate::instance::EntityInstance;
use crate::template::{EntityTemplate, TemplateOracle, TemplateRef};

/// TemplateOracle implementation backed by an in-memory template table.
///
/// The store holds the only strong references to its templates; unloading a
/// template drops it, which invalidates every weak reference handed out.
#[derive(Default)]
pub struct TemplateStore {
    templates: BTreeMap<String, TemplateRef>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Build a store from a template catalog.
    pub fn from_templates(templates: impl IntoIterator<Item = EntityTemplate>) -> Self {
        let mut store = Self::new();
        for template in templates {
            store.insert(template);
        }
        store
    }

    /// Add a template, replacing any template with the same name.
    pub fn insert(&mut self, template: EntityTemplate) -> TemplateRef {
        let name = template.name.clone();
        let template = template.into_ref();
        self.templates.insert(name, TemplateRef::clone(&template));
        template
    }

    pub fn get(&self, name: &str) -> Option<TemplateRef> {
        self.templates.get(name).cloned()
    }

    /// Drop a template. Returns false if no template had that name.
    pub fn unload(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    /// Spawn an instance of the named template from its current state.
    ///
    /// Returns `None` if the template is unknown or its lock was poisoned.
    pub fn spawn(&self, name: &str) -> Option<EntityInstance> {
        let template = self.templates.get(name)?;
        let template = template.read().ok()?;
        Some(EntityInstance::from_template(&template))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateOracle for TemplateStore {
    fn templates(&self) -> Vec<TemplateRef> {
        self.templates.values().cloned().collect()
    }
}
