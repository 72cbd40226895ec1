//! Tunable parameters and the values they carry.
use game_core::{Faction, MonsterAi};
use strum::{AsRefStr, Display, EnumIter};
use tweak_config::{AcceptableRange, AcceptableValues};

pub const TIMING_MIN: f32 = 0.0;
pub const TIMING_MAX: f32 = 1000.0;
pub const AGGRESSION_MIN: f32 = 0.1;
pub const AGGRESSION_MAX: f32 = 10.0;
pub const EVASION_MIN: f32 = 0.0;
pub const EVASION_MAX: f32 = 10.0;

/// One bound setting of a template. The variant name is the config key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum Parameter {
    CircleTargetDistance,
    CircleTargetDuration,
    CircleTargetInterval,
    MinAttackInterval,
    Aggression,
    Evasion,
    Faction,
}

impl Parameter {
    /// Raw timings, only bound when `bind_timings` is enabled.
    pub const TIMINGS: [Parameter; 4] = [
        Parameter::CircleTargetDistance,
        Parameter::CircleTargetDuration,
        Parameter::CircleTargetInterval,
        Parameter::MinAttackInterval,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Parameter::CircleTargetDistance => "CircleTargetDistance",
            Parameter::CircleTargetDuration => "CircleTargetDuration",
            Parameter::CircleTargetInterval => "CircleTargetInterval",
            Parameter::MinAttackInterval => "MinAttackInterval",
            Parameter::Aggression => "Aggression",
            Parameter::Evasion => "Evasion",
            Parameter::Faction => "Faction",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Parameter::CircleTargetDistance => {
                "Distance kept from the target while circling it, before Evasion is applied."
            }
            Parameter::CircleTargetDuration => {
                "Seconds spent circling the target, before Evasion is applied."
            }
            Parameter::CircleTargetInterval => {
                "Seconds between circling phases, before Aggression is applied."
            }
            Parameter::MinAttackInterval => {
                "Minimum seconds between attacks, before Aggression is applied."
            }
            Parameter::Aggression => {
                "Multiplier for how aggressive the creature is. Higher values attack and engage more often."
            }
            Parameter::Evasion => {
                "Multiplier for how much the creature keeps its distance and circles around its target."
            }
            Parameter::Faction => "Faction the creature belongs to.",
        }
    }

    /// Inclusive range of a numeric parameter; `None` for [`Parameter::Faction`].
    pub fn range(&self) -> Option<AcceptableRange<f32>> {
        match self {
            Parameter::Aggression => Some(AcceptableRange::new(AGGRESSION_MIN, AGGRESSION_MAX)),
            Parameter::Evasion => Some(AcceptableRange::new(EVASION_MIN, EVASION_MAX)),
            Parameter::Faction => None,
            _ => Some(AcceptableRange::new(TIMING_MIN, TIMING_MAX)),
        }
    }

    pub fn is_timing(&self) -> bool {
        Self::TIMINGS.contains(self)
    }

    /// Clamp a numeric value into this parameter's range.
    pub fn clamp(&self, value: f32) -> f32 {
        match self.range() {
            Some(range) => range.clamp(value),
            None => value,
        }
    }

    /// Mutable access to the timing field this parameter names.
    pub fn field_mut<'a>(&self, ai: &'a mut MonsterAi) -> Option<&'a mut f32> {
        match self {
            Parameter::CircleTargetDistance => Some(&mut ai.circle_target_distance),
            Parameter::CircleTargetDuration => Some(&mut ai.circle_target_duration),
            Parameter::CircleTargetInterval => Some(&mut ai.circle_target_interval),
            Parameter::MinAttackInterval => Some(&mut ai.min_attack_interval),
            _ => None,
        }
    }

    /// The multiplier scaling this timing, and whether it divides.
    ///
    /// Distance and duration grow with Evasion; intervals shrink as
    /// Aggression grows.
    pub fn scaled_by(&self) -> Option<(Parameter, bool)> {
        match self {
            Parameter::CircleTargetDistance | Parameter::CircleTargetDuration => {
                Some((Parameter::Evasion, false))
            }
            Parameter::CircleTargetInterval | Parameter::MinAttackInterval => {
                Some((Parameter::Aggression, true))
            }
            _ => None,
        }
    }
}

/// New value delivered with a change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Faction(Faction),
}

impl From<f32> for ParameterValue {
    fn from(value: f32) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<Faction> for ParameterValue {
    fn from(value: Faction) -> Self {
        ParameterValue::Faction(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_match_variant_names() {
        for parameter in Parameter::iter() {
            assert_eq!(parameter.key(), parameter.as_ref());
        }
    }

    #[test]
    fn every_timing_has_a_multiplier() {
        for parameter in Parameter::TIMINGS {
            assert!(parameter.is_timing());
            assert!(parameter.scaled_by().is_some());
        }
        assert_eq!(Parameter::Faction.scaled_by(), None);
        assert!(Parameter::Faction.range().is_none());
    }

    #[test]
    fn aggression_never_reaches_zero() {
        assert_eq!(Parameter::Aggression.clamp(0.0), AGGRESSION_MIN);
        assert_eq!(Parameter::Aggression.clamp(f32::NAN), AGGRESSION_MIN);
        assert_eq!(Parameter::Evasion.clamp(0.0), 0.0);
        assert_eq!(Parameter::MinAttackInterval.clamp(5000.0), TIMING_MAX);
    }

    #[test]
    fn fields_round_trip_through_accessors() {
        let mut ai = MonsterAi::new(10.0, 5.0, 4.0, 2.0);
        if let Some(field) = Parameter::MinAttackInterval.field_mut(&mut ai) {
            *field = 3.0;
        }
        assert_eq!(ai.min_attack_interval, 3.0);
        assert!(Parameter::Aggression.field_mut(&mut ai).is_none());
    }
}
