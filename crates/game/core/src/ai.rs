//! Autonomous behavior component.
//!
//! A template carrying [`MonsterAi`] is eligible for behavior tweaks. The
//! fields mirror the tunables the game reads every time the AI decides whether
//! to circle its target or attack.

/// Behavior controller tunables for one template or instance.
///
/// All values are in game units (meters or seconds) and are never negative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonsterAi {
    /// Radius the creature keeps while circling its target.
    pub circle_target_distance: f32,

    /// How long a circling phase lasts.
    pub circle_target_duration: f32,

    /// Maximum time between circling phases; 0 disables circling.
    pub circle_target_interval: f32,

    /// Minimum time between two attacks.
    pub min_attack_interval: f32,

    /// Radius of idle wandering around the spawn point.
    pub random_move_range: f32,
}

impl MonsterAi {
    pub fn new(
        circle_target_distance: f32,
        circle_target_duration: f32,
        circle_target_interval: f32,
        min_attack_interval: f32,
    ) -> Self {
        Self {
            circle_target_distance,
            circle_target_duration,
            circle_target_interval,
            min_attack_interval,
            ..Self::default()
        }
    }
}

impl Default for MonsterAi {
    fn default() -> Self {
        Self {
            circle_target_distance: 10.0,
            circle_target_duration: 5.0,
            circle_target_interval: 0.0,
            min_attack_interval: 0.0,
            random_move_range: 20.0,
        }
    }
}
