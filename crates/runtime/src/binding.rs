//! Lookup tables from bound config entries back to their templates.
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use game_core::{EntityTemplate, Faction, TemplateRef};
use tweak_config::{ConfigEntry, EntryId};

use crate::baseline::BaselineSnapshot;
use crate::parameter::Parameter;

/// Raw timing entries, bound only when `bind_timings` is enabled.
#[derive(Clone, Debug)]
pub struct TimingEntries {
    pub circle_target_distance: ConfigEntry<f32>,
    pub circle_target_duration: ConfigEntry<f32>,
    pub circle_target_interval: ConfigEntry<f32>,
    pub min_attack_interval: ConfigEntry<f32>,
}

impl TimingEntries {
    pub fn get(&self, parameter: Parameter) -> Option<&ConfigEntry<f32>> {
        match parameter {
            Parameter::CircleTargetDistance => Some(&self.circle_target_distance),
            Parameter::CircleTargetDuration => Some(&self.circle_target_duration),
            Parameter::CircleTargetInterval => Some(&self.circle_target_interval),
            Parameter::MinAttackInterval => Some(&self.min_attack_interval),
            _ => None,
        }
    }
}

/// Everything bound for one template.
///
/// The template is held weakly: the host may unload it at any time, after
/// which every mutation through this binding becomes a no-op.
#[derive(Debug)]
pub struct TemplateBinding {
    pub name: String,
    pub template: Weak<RwLock<EntityTemplate>>,
    pub baseline: BaselineSnapshot,
    pub aggression: ConfigEntry<f32>,
    pub evasion: ConfigEntry<f32>,
    pub faction: Option<ConfigEntry<Faction>>,
    pub timings: Option<TimingEntries>,
}

impl TemplateBinding {
    /// The template, if the host still has it loaded.
    pub fn template(&self) -> Option<TemplateRef> {
        self.template.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.template.strong_count() > 0
    }

    /// Whether this binding was made for exactly this template object.
    pub fn is_for(&self, template: &TemplateRef) -> bool {
        Weak::ptr_eq(&self.template, &Arc::downgrade(template))
    }

    /// Value a timing is scaled from: the raw entry when bound, otherwise
    /// the captured baseline.
    pub fn base(&self, parameter: Parameter) -> Option<f32> {
        match self.timings.as_ref().and_then(|timings| timings.get(parameter)) {
            Some(entry) => Some(entry.value()),
            None => self.baseline.get(parameter),
        }
    }

    /// Current value of a multiplier entry.
    pub fn multiplier(&self, parameter: Parameter) -> Option<f32> {
        match parameter {
            Parameter::Aggression => Some(self.aggression.value()),
            Parameter::Evasion => Some(self.evasion.value()),
            _ => None,
        }
    }

    /// Every bound entry and the parameter it controls.
    pub fn handles(&self) -> Vec<(EntryId, Parameter)> {
        let mut handles = vec![
            (self.aggression.id(), Parameter::Aggression),
            (self.evasion.id(), Parameter::Evasion),
        ];
        if let Some(faction) = &self.faction {
            handles.push((faction.id(), Parameter::Faction));
        }
        if let Some(timings) = &self.timings {
            for parameter in Parameter::TIMINGS {
                if let Some(entry) = timings.get(parameter) {
                    handles.push((entry.id(), parameter));
                }
            }
        }
        handles
    }
}

/// Resolution of one entry handle.
#[derive(Clone, Debug)]
pub struct Binding {
    pub parameter: Parameter,
    pub template: Arc<TemplateBinding>,
}

/// Handle-to-template map plus the per-template aggression index used when
/// instances spawn.
#[derive(Debug, Default)]
pub struct BindingTable {
    by_handle: HashMap<EntryId, Binding>,
    by_template: HashMap<String, Arc<TemplateBinding>>,
    aggression_by_template: HashMap<String, ConfigEntry<f32>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every handle of a template binding.
    ///
    /// `armed` marks templates whose default loadout carries an equipable
    /// weapon; only those are indexed for spawn-time rescaling.
    pub fn insert(&mut self, binding: Arc<TemplateBinding>, armed: bool) {
        for (handle, parameter) in binding.handles() {
            self.by_handle.insert(
                handle,
                Binding {
                    parameter,
                    template: Arc::clone(&binding),
                },
            );
        }
        if armed {
            self.aggression_by_template
                .insert(binding.name.clone(), binding.aggression.clone());
        }
        self.by_template.insert(binding.name.clone(), binding);
    }

    pub fn get(&self, handle: EntryId) -> Option<&Binding> {
        self.by_handle.get(&handle)
    }

    pub fn template(&self, name: &str) -> Option<&Arc<TemplateBinding>> {
        self.by_template.get(name)
    }

    pub fn contains_template(&self, name: &str) -> bool {
        self.by_template.contains_key(name)
    }

    /// Aggression entry of an armed template.
    pub fn aggression_for(&self, name: &str) -> Option<&ConfigEntry<f32>> {
        self.aggression_by_template.get(name)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Arc<TemplateBinding>> + '_ {
        self.by_template.values()
    }

    /// Number of bound handles.
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }

    pub fn template_count(&self) -> usize {
        self.by_template.len()
    }

    pub fn armed_count(&self) -> usize {
        self.aggression_by_template.len()
    }

    /// Empty the table, returning the template bindings it held.
    pub fn clear(&mut self) -> Vec<Arc<TemplateBinding>> {
        self.by_handle.clear();
        self.aggression_by_template.clear();
        self.by_template.drain().map(|(_, binding)| binding).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::MonsterAi;
    use tempfile::TempDir;
    use tweak_config::ConfigFile;

    fn binding(config: &ConfigFile, template: &TemplateRef, name: &str) -> TemplateBinding {
        TemplateBinding {
            name: name.to_string(),
            template: Arc::downgrade(template),
            baseline: BaselineSnapshot::capture(&MonsterAi::new(10.0, 5.0, 4.0, 2.0)),
            aggression: config.bind(name, "Aggression", 1.0f32, "").unwrap(),
            evasion: config.bind(name, "Evasion", 1.0f32, "").unwrap(),
            faction: None,
            timings: None,
        }
    }

    #[test]
    fn insert_indexes_every_handle() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::open(temp_dir.path().join("t.toml")).unwrap();
        let template = EntityTemplate::new("Goblin").into_ref();
        let binding = Arc::new(binding(&config, &template, "Goblin"));
        let aggression = binding.aggression.id();

        let mut table = BindingTable::new();
        table.insert(Arc::clone(&binding), true);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(aggression).unwrap().parameter, Parameter::Aggression);
        assert!(table.aggression_for("Goblin").is_some());
        assert!(binding.is_for(&template));

        let drained = table.clear();
        assert_eq!(drained.len(), 1);
        assert!(table.is_empty());
        assert!(table.aggression_for("Goblin").is_none());
    }

    #[test]
    fn unarmed_templates_are_not_indexed() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::open(temp_dir.path().join("t.toml")).unwrap();
        let template = EntityTemplate::new("Boar").into_ref();

        let mut table = BindingTable::new();
        table.insert(Arc::new(binding(&config, &template, "Boar")), false);

        assert!(table.aggression_for("Boar").is_none());
        assert_eq!(table.template_count(), 1);
    }

    #[test]
    fn base_prefers_raw_timing_entries() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::open(temp_dir.path().join("t.toml")).unwrap();
        let template = EntityTemplate::new("Wolf").into_ref();
        let mut binding = binding(&config, &template, "Wolf");

        assert_eq!(binding.base(Parameter::MinAttackInterval), Some(2.0));

        let raw = |key: &str, value: f32| config.bind("Wolf", key, value, "").unwrap();
        binding.timings = Some(TimingEntries {
            circle_target_distance: raw("CircleTargetDistance", 10.0),
            circle_target_duration: raw("CircleTargetDuration", 5.0),
            circle_target_interval: raw("CircleTargetInterval", 4.0),
            min_attack_interval: raw("MinAttackInterval", 6.0),
        });

        assert_eq!(binding.base(Parameter::MinAttackInterval), Some(6.0));
        assert_eq!(binding.handles().len(), 6);

        drop(template);
        assert!(!binding.is_alive());
        assert!(binding.template().is_none());
    }
}
