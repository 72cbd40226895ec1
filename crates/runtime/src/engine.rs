//! Translates entry changes into template mutations.
use std::sync::{Arc, RwLock, Weak};

use game_core::{EntityTemplate, MonsterAi};
use tracing::{debug, trace, warn};
use tweak_config::EntryId;

use crate::binding::{BindingTable, TemplateBinding};
use crate::parameter::{Parameter, ParameterValue};

/// Applies parameter values to the templates they are bound to.
///
/// Timings are always recomputed from their base (baseline or raw entry)
/// and the current multiplier, so any sequence of changes ends in the same
/// state as applying the final value once.
#[derive(Clone, Debug, Default)]
pub struct OverrideEngine {
    table: Arc<RwLock<BindingTable>>,
}

impl OverrideEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Arc<RwLock<BindingTable>> {
        &self.table
    }

    /// Weak handle for change callbacks, so subscriptions never keep the
    /// engine alive.
    pub fn downgrade(&self) -> Weak<RwLock<BindingTable>> {
        Arc::downgrade(&self.table)
    }

    pub fn upgrade(table: &Weak<RwLock<BindingTable>>) -> Option<Self> {
        table.upgrade().map(|table| Self { table })
    }

    /// Handle a change notification.
    ///
    /// Unknown handles and bindings whose template was unloaded are ignored.
    /// Returns whether a template was mutated.
    pub fn on_change(&self, handle: EntryId, value: ParameterValue) -> bool {
        let binding = {
            let Ok(table) = self.table.read() else {
                warn!(target: "runtime::engine", %handle, "Binding table lock poisoned");
                return false;
            };
            match table.get(handle) {
                Some(binding) => binding.clone(),
                None => {
                    trace!(target: "runtime::engine", %handle, "Change for unbound entry");
                    return false;
                }
            }
        };

        Self::apply(&binding.template, binding.parameter, value)
    }

    /// Apply one parameter value to a binding's template.
    pub fn apply(binding: &TemplateBinding, parameter: Parameter, value: ParameterValue) -> bool {
        let Some(template) = binding.template() else {
            debug!(
                target: "runtime::engine",
                template = %binding.name,
                %parameter,
                "Template unloaded, ignoring change"
            );
            return false;
        };
        let Ok(mut template) = template.write() else {
            warn!(target: "runtime::engine", template = %binding.name, "Template lock poisoned");
            return false;
        };

        let applied = match (parameter, value) {
            (Parameter::Faction, ParameterValue::Faction(faction)) => {
                match template.character.as_mut() {
                    Some(character) => {
                        character.faction = faction;
                        true
                    }
                    None => false,
                }
            }
            (Parameter::Aggression | Parameter::Evasion, ParameterValue::Float(factor)) => {
                let factor = parameter.clamp(factor);
                with_ai(&mut template, |ai| {
                    for timing in Parameter::TIMINGS {
                        if timing.scaled_by().map(|(by, _)| by) == Some(parameter) {
                            rescale(ai, binding, timing, binding.base(timing), factor);
                        }
                    }
                })
            }
            (timing, ParameterValue::Float(raw)) if timing.is_timing() => {
                let factor = timing
                    .scaled_by()
                    .and_then(|(by, _)| binding.multiplier(by));
                match factor {
                    Some(factor) => with_ai(&mut template, |ai| {
                        rescale(ai, binding, timing, Some(timing.clamp(raw)), factor)
                    }),
                    None => false,
                }
            }
            (parameter, value) => {
                warn!(
                    target: "runtime::engine",
                    template = %binding.name,
                    %parameter,
                    ?value,
                    "Value kind does not match parameter"
                );
                false
            }
        };

        if applied {
            trace!(
                target: "runtime::engine",
                template = %binding.name,
                %parameter,
                ?value,
                "Applied override"
            );
        }
        applied
    }

    /// Apply every bound parameter of a binding from its current entry values.
    pub fn apply_all(binding: &TemplateBinding) {
        Self::apply(binding, Parameter::Aggression, binding.aggression.value().into());
        Self::apply(binding, Parameter::Evasion, binding.evasion.value().into());
        if let Some(faction) = &binding.faction {
            Self::apply(binding, Parameter::Faction, faction.value().into());
        }
    }
}

fn with_ai(template: &mut EntityTemplate, f: impl FnOnce(&mut MonsterAi)) -> bool {
    match template.ai.as_mut() {
        Some(ai) => {
            f(ai);
            true
        }
        None => false,
    }
}

fn rescale(
    ai: &mut MonsterAi,
    binding: &TemplateBinding,
    timing: Parameter,
    base: Option<f32>,
    factor: f32,
) {
    let (Some(base), Some((_, divides))) = (base, timing.scaled_by()) else {
        return;
    };
    let Some(field) = timing.field_mut(ai) else {
        return;
    };
    *field = if divides { base / factor } else { base * factor };
    trace!(
        target: "runtime::engine",
        template = %binding.name,
        field = %timing,
        value = *field,
        "Rescaled timing"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineSnapshot;
    use game_core::{Character, Faction, TemplateRef};
    use tempfile::TempDir;
    use tweak_config::ConfigFile;

    struct Fixture {
        _dir: TempDir,
        template: TemplateRef,
        binding: TemplateBinding,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::open(dir.path().join("t.toml")).unwrap();
        let template = EntityTemplate::new("Deathsquito")
            .with_ai(MonsterAi::new(10.0, 4.0, 5.0, 2.0))
            .with_character(Character::new(Faction::PlainsMonsters))
            .into_ref();
        let baseline = BaselineSnapshot::capture(template.read().unwrap().ai.as_ref().unwrap());
        let binding = TemplateBinding {
            name: "Deathsquito".to_string(),
            template: Arc::downgrade(&template),
            baseline,
            aggression: config.bind("Deathsquito", "Aggression", 1.0f32, "").unwrap(),
            evasion: config.bind("Deathsquito", "Evasion", 1.0f32, "").unwrap(),
            faction: None,
            timings: None,
        };
        Fixture {
            _dir: dir,
            template,
            binding,
        }
    }

    fn ai(template: &TemplateRef) -> MonsterAi {
        template.read().unwrap().ai.clone().unwrap()
    }

    #[test]
    fn aggression_divides_intervals() {
        let f = fixture();
        assert!(OverrideEngine::apply(&f.binding, Parameter::Aggression, ParameterValue::Float(2.0)));

        let ai = ai(&f.template);
        assert_eq!(ai.min_attack_interval, 1.0);
        assert_eq!(ai.circle_target_interval, 2.5);
        assert_eq!(ai.circle_target_distance, 10.0);
    }

    #[test]
    fn evasion_scales_from_baseline_without_compounding() {
        let f = fixture();
        for factor in [2.0, 0.5, 3.0] {
            OverrideEngine::apply(&f.binding, Parameter::Evasion, ParameterValue::Float(factor));
        }

        let ai = ai(&f.template);
        assert_eq!(ai.circle_target_distance, 30.0);
        assert_eq!(ai.circle_target_duration, 12.0);
        assert_eq!(ai.random_move_range, MonsterAi::default().random_move_range);
    }

    #[test]
    fn zero_evasion_collapses_circling() {
        let f = fixture();
        OverrideEngine::apply(&f.binding, Parameter::Evasion, ParameterValue::Float(0.0));
        assert_eq!(ai(&f.template).circle_target_distance, 0.0);
    }

    #[test]
    fn faction_is_replaced() {
        let f = fixture();
        assert!(OverrideEngine::apply(
            &f.binding,
            Parameter::Faction,
            Faction::Undead.into()
        ));
        let faction = f.template.read().unwrap().character.as_ref().unwrap().faction;
        assert_eq!(faction, Faction::Undead);
    }

    #[test]
    fn mismatched_value_kind_is_rejected() {
        let f = fixture();
        assert!(!OverrideEngine::apply(
            &f.binding,
            Parameter::Aggression,
            Faction::Undead.into()
        ));
        assert_eq!(ai(&f.template).min_attack_interval, 2.0);
    }

    #[test]
    fn unloaded_template_is_left_alone() {
        let f = fixture();
        drop(f.template);
        assert!(!OverrideEngine::apply(&f.binding, Parameter::Aggression, ParameterValue::Float(2.0)));
    }

    #[test]
    fn unknown_handle_is_a_no_op() {
        let f = fixture();
        let engine = OverrideEngine::new();
        assert!(!engine.on_change(f.binding.aggression.id(), ParameterValue::Float(2.0)));
        assert_eq!(ai(&f.template).min_attack_interval, 2.0);
    }

    #[test]
    fn weak_handle_dies_with_the_engine() {
        let engine = OverrideEngine::new();
        let weak = engine.downgrade();
        assert!(OverrideEngine::upgrade(&weak).is_some());
        drop(engine);
        assert!(OverrideEngine::upgrade(&weak).is_none());
    }
}
