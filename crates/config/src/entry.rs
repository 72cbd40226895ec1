//! Typed config entries and their change notifications.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::{trace, warn};

use crate::file::StoreShared;
use crate::range::AcceptableValues;
use crate::value::ConfigValue;

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a bound entry.
///
/// Ids are unique for the lifetime of the process, so they can key lookup
/// tables without holding the entry itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Location of an entry in the config file: `[section]` then `key = ...`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigDefinition {
    pub section: String,
    pub key: String,
}

impl ConfigDefinition {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ConfigDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

/// Handle returned by [`ConfigEntry::on_changed`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&ConfigEntry<T>) + Send + Sync>;

struct EntryInner<T: ConfigValue> {
    id: EntryId,
    definition: ConfigDefinition,
    description: String,
    default: T,
    acceptable: Option<Arc<dyn AcceptableValues<T>>>,
    value: RwLock<T>,
    subscribers: RwLock<Vec<(SubscriptionId, Callback<T>)>>,
    next_subscription: AtomicU64,
    store: Weak<StoreShared>,
}

/// A bound, persisted, named setting with a current value.
///
/// Cloning is cheap; all clones refer to the same entry.
pub struct ConfigEntry<T: ConfigValue> {
    inner: Arc<EntryInner<T>>,
}

impl<T: ConfigValue> ConfigEntry<T> {
    pub(crate) fn new(
        definition: ConfigDefinition,
        description: String,
        default: T,
        acceptable: Option<Arc<dyn AcceptableValues<T>>>,
        initial: T,
        store: Weak<StoreShared>,
    ) -> Self {
        let initial = match &acceptable {
            Some(acceptable) => acceptable.clamp(initial),
            None => initial,
        };

        Self {
            inner: Arc::new(EntryInner {
                id: EntryId::next(),
                definition,
                description,
                default,
                acceptable,
                value: RwLock::new(initial),
                subscribers: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                store,
            }),
        }
    }

    pub fn id(&self) -> EntryId {
        self.inner.id
    }

    pub fn definition(&self) -> &ConfigDefinition {
        &self.inner.definition
    }

    pub fn section(&self) -> &str {
        &self.inner.definition.section
    }

    pub fn key(&self) -> &str {
        &self.inner.definition.key
    }

    pub fn description(&self) -> &str {
        &self.inner.description
    }

    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    pub fn acceptable(&self) -> Option<&dyn AcceptableValues<T>> {
        self.inner.acceptable.as_deref()
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a new value.
    ///
    /// The value is clamped to the acceptable range first. Subscribers are
    /// notified only if the stored value changed, after which the store saves
    /// itself when save-on-set is enabled. Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        self.set_with(value, true)
    }

    pub(crate) fn set_with(&self, value: T, autosave: bool) -> bool {
        let value = self.clamp(value);

        {
            let mut current = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return false;
            }
            *current = value;
        }

        self.notify();

        if autosave && let Some(store) = self.inner.store.upgrade() {
            store.autosave();
        }

        true
    }

    /// Register a callback invoked after every change of the stored value.
    ///
    /// Callbacks run synchronously on the thread that performed the change.
    pub fn on_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ConfigEntry<T>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clamp(&self, value: T) -> T {
        match &self.inner.acceptable {
            Some(acceptable) => acceptable.clamp(value),
            None => value,
        }
    }

    fn notify(&self) {
        // Snapshot so callbacks may (un)subscribe without deadlocking.
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        trace!(
            target: "config::entry",
            entry = %self.inner.definition,
            subscribers = callbacks.len(),
            "Setting changed"
        );

        for callback in callbacks {
            callback(self);
        }
    }
}

impl<T: ConfigValue> Clone for ConfigEntry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ConfigValue> fmt::Debug for ConfigEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("id", &self.inner.id)
            .field("definition", &self.inner.definition)
            .field("value", &self.value())
            .finish()
    }
}

/// Entry as written to disk.
pub(crate) struct RenderedEntry {
    pub description: String,
    pub type_name: &'static str,
    pub default: toml::Value,
    pub value: toml::Value,
    pub acceptable: Option<String>,
}

/// Type-erased view the store uses to persist and reload entries.
pub(crate) trait ErasedEntry: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn render(&self) -> RenderedEntry;

    /// Apply a value read from disk without triggering an autosave.
    fn load_persisted(&self, value: &toml::Value) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<T: ConfigValue> ErasedEntry for ConfigEntry<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn render(&self) -> RenderedEntry {
        let acceptable = self
            .acceptable()
            .map(|acceptable| acceptable.describe())
            .or_else(T::accepted_values);

        RenderedEntry {
            description: self.inner.description.clone(),
            type_name: T::TYPE_NAME,
            default: self.inner.default.to_toml(),
            value: self.value().to_toml(),
            acceptable,
        }
    }

    fn load_persisted(&self, value: &toml::Value) -> bool {
        match T::from_toml(value) {
            Some(parsed) => self.set_with(parsed, false),
            None => {
                warn!(
                    target: "config::entry",
                    entry = %self.inner.definition,
                    expected = T::TYPE_NAME,
                    found = %value,
                    "Ignoring persisted value of the wrong type"
                );
                false
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::AcceptableRange;
    use std::sync::atomic::AtomicUsize;

    fn detached(default: f32) -> ConfigEntry<f32> {
        ConfigEntry::new(
            ConfigDefinition::new("Troll", "Aggression"),
            "test".to_string(),
            default,
            Some(Arc::new(AcceptableRange::new(0.1f32, 10.0))),
            default,
            Weak::new(),
        )
    }

    #[test]
    fn set_clamps_and_notifies_on_change_only() {
        let entry = detached(1.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        entry.on_changed(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(entry.set(50.0));
        assert_eq!(entry.value(), 10.0);
        assert!(!entry.set(10.0));
        assert!(!entry.set(11.0)); // clamps to the current value
        assert!(entry.set(0.0));
        assert_eq!(entry.value(), 0.1);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let entry = detached(1.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = entry.on_changed(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        entry.set(2.0);
        assert!(entry.unsubscribe(id));
        assert!(!entry.unsubscribe(id));
        entry.set(3.0);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(entry.subscriber_count(), 0);
    }

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = detached(1.0);
        let b = detached(1.0);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn callbacks_see_the_new_value() {
        let entry = detached(1.0);
        let observed = Arc::new(RwLock::new(0.0f32));
        let sink = Arc::clone(&observed);
        entry.on_changed(move |entry| {
            *sink.write().unwrap() = entry.value();
        });

        entry.set(4.0);
        assert_eq!(*observed.read().unwrap(), 4.0);
    }
}
