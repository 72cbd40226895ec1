//! Hooks run whenever a tuned entity is spawned into the world.
//!
//! Some tuned values live on per-instance copies rather than on the shared
//! template (weapon attack intervals, for instance), so template overrides
//! alone never reach them. Instance hooks patch those copies as each
//! instance starts.
//!
//! # Architecture
//!
//! - Hooks are registered with a [`HookRegistry`] and sorted by priority
//! - Every instance start runs each hook once, in priority order
//! - Hook failures are handled according to [`HookCriticality`]

mod context;
mod registry;
mod weapon_interval;

pub use context::HookContext;
pub use registry::HookRegistry;
pub use weapon_interval::WeaponIntervalHook;

use game_core::EntityInstance;

use crate::error::HookError;

/// Defines the criticality level of a hook for error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the instance start.
    Critical,

    /// Hook failure is logged as an error and the remaining hooks still run.
    ///
    /// This is the default level.
    Important,

    /// Hook failure is logged at debug level only.
    Optional,
}

/// Hook invoked once per spawned instance.
pub trait InstanceHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Patch the freshly spawned instance.
    ///
    /// Instances that do not concern the hook must be left untouched and
    /// reported as success.
    fn on_instance_start(
        &self,
        ctx: &HookContext<'_>,
        instance: &mut EntityInstance,
    ) -> Result<(), HookError>;
}
