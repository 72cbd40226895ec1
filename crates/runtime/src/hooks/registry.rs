//! Hook registry for running instance hooks.

use std::sync::Arc;

use game_core::EntityInstance;
use tracing::{debug, error};

use super::{HookContext, HookCriticality, InstanceHook, WeaponIntervalHook};
use crate::error::{HookError, Result, TweakError};

/// Ordered set of instance hooks.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn InstanceHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn InstanceHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - WeaponIntervalHook: rescales weapon attack intervals by Aggression
    pub fn default_hooks() -> Self {
        Self::new(vec![Arc::new(WeaponIntervalHook) as Arc<dyn InstanceHook>])
    }

    /// Runs every hook against a spawned instance.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: returns the error immediately
    /// - `Important`: logs the error and continues with the next hook
    /// - `Optional`: logs at debug level and continues
    pub fn execute(&self, ctx: &HookContext<'_>, instance: &mut EntityInstance) -> Result<()> {
        for hook in self.hooks.iter() {
            if let Err(e) = hook.on_instance_start(ctx, instance) {
                self.handle_hook_error(hook.as_ref(), &instance.name, e)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn handle_hook_error(
        &self,
        hook: &dyn InstanceHook,
        instance: &str,
        error: HookError,
    ) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    instance,
                    error = %error,
                    "Critical hook failed, aborting instance start"
                );
                return Err(TweakError::Hook {
                    hook: hook.name(),
                    source: error,
                });
            }
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "important",
                instance,
                error = %error,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "optional",
                instance,
                error = %error,
                "Optional hook failed"
            ),
        }
        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}
