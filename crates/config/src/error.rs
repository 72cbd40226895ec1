//! Error types raised by the configuration store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`ConfigFile`](crate::ConfigFile) and its watcher.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("entry {definition} is already bound as {bound}, requested {requested}")]
    TypeMismatch {
        definition: String,
        bound: &'static str,
        requested: &'static str,
    },

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
