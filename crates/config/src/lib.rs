//! Persisted configuration store with change notifications.
//!
//! A [`ConfigFile`] hands out typed [`ConfigEntry`] handles, one per
//! (section, key). Entries carry a default, a description and an optional
//! acceptable-value constraint, expose their current value, and notify
//! subscribers whenever that value changes, whether through
//! [`ConfigEntry::set`] or through a [`ConfigFile::reload`] after the file was
//! edited on disk. [`ConfigWatcher`] automates the latter.
//!
//! Out-of-range writes are clamped here, at the store boundary, so consumers
//! can assume every value they observe is within range.
pub mod entry;
pub mod error;
pub mod file;
pub mod range;
pub mod value;
pub mod watcher;

pub use entry::{ConfigDefinition, ConfigEntry, EntryId, SubscriptionId};
pub use error::{ConfigError, Result};
pub use file::ConfigFile;
pub use range::{AcceptableList, AcceptableRange, AcceptableValues};
pub use value::{ConfigValue, LogLevel};
pub use watcher::ConfigWatcher;
