//! Error types surfaced by the tweak runtime.
use thiserror::Error;

use tweak_config::ConfigError;

pub type Result<T> = std::result::Result<T, TweakError>;

#[derive(Debug, Error)]
pub enum TweakError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("binding table lock was poisoned")]
    LockPoisoned,

    #[error("instance hook {hook} failed")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },
}

/// Failure of a single [`InstanceHook`](crate::hooks::InstanceHook) run.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("item {item} has a malformed attack interval ({interval})")]
    MalformedItem { item: String, interval: f32 },
}
