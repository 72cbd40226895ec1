//! Binds config entries for discovered templates.
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use game_core::{Humanoid, TemplateRef};
use tracing::{debug, warn};
use tweak_config::{ConfigEntry, ConfigFile, ConfigValue, EntryId};

use crate::baseline::BaselineSnapshot;
use crate::binding::{BindingTable, TemplateBinding, TimingEntries};
use crate::engine::OverrideEngine;
use crate::error::Result;
use crate::parameter::{Parameter, ParameterValue};
use crate::settings::TweakSettings;

/// Creates entries for templates and wires them to the override engine.
pub struct Binder {
    config: ConfigFile,
    settings: TweakSettings,
    engine: OverrideEngine,
    subscribed: Mutex<HashSet<EntryId>>,
    retained: Mutex<HashMap<String, Arc<TemplateBinding>>>,
}

impl Binder {
    pub fn new(config: ConfigFile, settings: TweakSettings, engine: OverrideEngine) -> Self {
        Self {
            config,
            settings,
            engine,
            subscribed: Mutex::new(HashSet::new()),
            retained: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &TweakSettings {
        &self.settings
    }

    /// Bind one template into `table` and apply its current values.
    ///
    /// Templates without a behavior controller or character component are
    /// skipped silently, as are names already in the table. Returns whether
    /// the template was bound.
    pub fn bind(&self, table: &mut BindingTable, template: &TemplateRef) -> Result<bool> {
        let (name, baseline, faction, armed) = {
            let Ok(guard) = template.read() else {
                warn!(target: "runtime::binding", "Skipping template with poisoned lock");
                return Ok(false);
            };
            let Some(ai) = guard.ai.as_ref() else {
                debug!(target: "runtime::binding", template = %guard.name, "No behavior controller");
                return Ok(false);
            };
            let Some(character) = guard.character.as_ref() else {
                debug!(target: "runtime::binding", template = %guard.name, "No character component");
                return Ok(false);
            };
            (
                guard.name.clone(),
                BaselineSnapshot::capture(ai),
                character.faction,
                character
                    .as_humanoid()
                    .is_some_and(Humanoid::has_equipable_weapon),
            )
        };

        if table.contains_template(&name) {
            debug!(target: "runtime::binding", template = %name, "Template already bound");
            return Ok(false);
        }

        let binding = match self.take_retained(&name, template) {
            Some(binding) => {
                debug!(target: "runtime::binding", template = %name, "Reusing retained baseline");
                binding
            }
            None => Arc::new(self.bind_entries(&name, template, baseline, faction)?),
        };

        table.insert(Arc::clone(&binding), armed);
        self.subscribe(&binding);
        OverrideEngine::apply_all(&binding);

        debug!(
            target: "runtime::binding",
            template = %name,
            armed,
            aggression = binding.aggression.value(),
            evasion = binding.evasion.value(),
            "Bound template"
        );
        Ok(true)
    }

    /// Keep bindings of templates that outlive a world unload, so their
    /// baselines are reused instead of recaptured from overridden values.
    pub fn retain(&self, bindings: impl IntoIterator<Item = Arc<TemplateBinding>>) {
        let mut retained = self.retained.lock().unwrap_or_else(PoisonError::into_inner);
        retained.retain(|_, binding| binding.is_alive());
        for binding in bindings {
            if binding.is_alive() {
                retained.insert(binding.name.clone(), binding);
            }
        }
    }

    pub fn retained_count(&self) -> usize {
        self.retained
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn take_retained(&self, name: &str, template: &TemplateRef) -> Option<Arc<TemplateBinding>> {
        self.retained
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .filter(|binding| binding.is_for(template))
    }

    fn bind_entries(
        &self,
        name: &str,
        template: &TemplateRef,
        baseline: BaselineSnapshot,
        faction: game_core::Faction,
    ) -> Result<TemplateBinding> {
        let timings = if self.settings.bind_timings {
            Some(TimingEntries {
                circle_target_distance: self.bind_float(
                    name,
                    Parameter::CircleTargetDistance,
                    baseline.circle_target_distance,
                )?,
                circle_target_duration: self.bind_float(
                    name,
                    Parameter::CircleTargetDuration,
                    baseline.circle_target_duration,
                )?,
                circle_target_interval: self.bind_float(
                    name,
                    Parameter::CircleTargetInterval,
                    baseline.circle_target_interval,
                )?,
                min_attack_interval: self.bind_float(
                    name,
                    Parameter::MinAttackInterval,
                    baseline.min_attack_interval,
                )?,
            })
        } else {
            None
        };

        let faction = if self.settings.bind_faction {
            Some(self.config.bind(
                name,
                Parameter::Faction.key(),
                faction,
                Parameter::Faction.description(),
            )?)
        } else {
            None
        };

        Ok(TemplateBinding {
            name: name.to_string(),
            template: Arc::downgrade(template),
            baseline,
            aggression: self.bind_float(name, Parameter::Aggression, 1.0)?,
            evasion: self.bind_float(name, Parameter::Evasion, 1.0)?,
            faction,
            timings,
        })
    }

    fn bind_float(
        &self,
        name: &str,
        parameter: Parameter,
        default: f32,
    ) -> Result<ConfigEntry<f32>> {
        let entry = match parameter.range() {
            Some(range) => self.config.bind_with(
                name,
                parameter.key(),
                default,
                parameter.description(),
                range,
            )?,
            None => self
                .config
                .bind(name, parameter.key(), default, parameter.description())?,
        };
        Ok(entry)
    }

    fn subscribe(&self, binding: &TemplateBinding) {
        let mut subscribed = self.subscribed.lock().unwrap_or_else(PoisonError::into_inner);
        let mut track = |entry: &dyn Subscribable| {
            if subscribed.insert(entry.handle()) {
                entry.subscribe(&self.engine);
            }
        };

        track(&binding.aggression);
        track(&binding.evasion);
        if let Some(faction) = &binding.faction {
            track(faction);
        }
        if let Some(timings) = &binding.timings {
            for parameter in Parameter::TIMINGS {
                if let Some(entry) = timings.get(parameter) {
                    track(entry);
                }
            }
        }
    }
}

/// Entry whose changes can be forwarded to the override engine.
trait Subscribable {
    fn handle(&self) -> EntryId;

    fn subscribe(&self, engine: &OverrideEngine);
}

impl<T> Subscribable for ConfigEntry<T>
where
    T: ConfigValue + Into<ParameterValue>,
{
    fn handle(&self) -> EntryId {
        self.id()
    }

    fn subscribe(&self, engine: &OverrideEngine) {
        let table = engine.downgrade();
        self.on_changed(move |entry| {
            if let Some(engine) = OverrideEngine::upgrade(&table) {
                engine.on_change(entry.id(), entry.value().into());
            }
        });
    }
}
