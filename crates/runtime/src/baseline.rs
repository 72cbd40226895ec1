//! Unmodified timing values captured before any override is applied.
use game_core::MonsterAi;

use crate::parameter::Parameter;

/// Timing values of a template as first observed.
///
/// Overrides are always computed from these, never from the live fields,
/// so repeated changes do not compound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaselineSnapshot {
    pub circle_target_distance: f32,
    pub circle_target_duration: f32,
    pub circle_target_interval: f32,
    pub min_attack_interval: f32,
}

impl BaselineSnapshot {
    pub fn capture(ai: &MonsterAi) -> Self {
        Self {
            circle_target_distance: ai.circle_target_distance,
            circle_target_duration: ai.circle_target_duration,
            circle_target_interval: ai.circle_target_interval,
            min_attack_interval: ai.min_attack_interval,
        }
    }

    /// Baseline of a timing parameter, `None` for multipliers and faction.
    pub fn get(&self, parameter: Parameter) -> Option<f32> {
        match parameter {
            Parameter::CircleTargetDistance => Some(self.circle_target_distance),
            Parameter::CircleTargetDuration => Some(self.circle_target_duration),
            Parameter::CircleTargetInterval => Some(self.circle_target_interval),
            Parameter::MinAttackInterval => Some(self.min_attack_interval),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_copies_the_four_timings() {
        let mut ai = MonsterAi::new(12.0, 6.0, 5.0, 2.0);
        let baseline = BaselineSnapshot::capture(&ai);

        ai.min_attack_interval = 0.5;

        assert_eq!(baseline.get(Parameter::MinAttackInterval), Some(2.0));
        assert_eq!(baseline.get(Parameter::CircleTargetDistance), Some(12.0));
        assert_eq!(baseline.get(Parameter::Evasion), None);
    }
}
