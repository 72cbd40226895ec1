//! File-backed configuration store.
//!
//! Settings are stored as TOML with one table per section. Each entry is
//! preceded by comment lines describing it, so the file doubles as
//! documentation for players editing it by hand:
//!
//! ```toml
//! [Deathsquito]
//!
//! ## Multiplier for how evasive the creature is when not attacking.
//! # Setting type: Single
//! # Default value: 1.0
//! # Acceptable values: From 0 to 10
//! Evasion = 1.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, warn};

use crate::entry::{ConfigDefinition, ConfigEntry, ErasedEntry, RenderedEntry};
use crate::error::{ConfigError, Result};
use crate::range::AcceptableValues;
use crate::value::ConfigValue;

const FILE_HEADER: &str = "## Settings file was created by monster-tweaks";

pub(crate) struct StoreShared {
    path: PathBuf,
    entries: RwLock<BTreeMap<ConfigDefinition, Arc<dyn ErasedEntry>>>,
    /// Persisted values whose entry has not been bound yet.
    orphans: RwLock<BTreeMap<ConfigDefinition, toml::Value>>,
    save_on_set: AtomicBool,
    io: Mutex<()>,
}

impl StoreShared {
    /// Save if save-on-set is enabled; failures are logged, not returned.
    pub(crate) fn autosave(&self) {
        if !self.save_on_set.load(Ordering::Acquire) {
            return;
        }
        if let Err(e) = self.save() {
            warn!(
                target: "config::file",
                path = %self.path.display(),
                error = %e,
                "Failed to save config"
            );
        }
    }

    fn save(&self) -> Result<()> {
        let _io = self.io.lock().map_err(|_| ConfigError::LockPoisoned)?;

        let document = {
            let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
            let orphans = self.orphans.read().map_err(|_| ConfigError::LockPoisoned)?;
            render_document(&entries, &orphans)
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        // Write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, document).map_err(|source| self.io_error(source))?;
        fs::rename(&temp_path, &self.path).map_err(|source| self.io_error(source))?;

        debug!(target: "config::file", path = %self.path.display(), "Saved config");
        Ok(())
    }

    fn reload(&self) -> Result<usize> {
        let Some(persisted) = read_document(&self.path)? else {
            return Ok(0);
        };

        // Resolve targets first and apply outside the locks: change callbacks
        // may read the store again.
        let mut updates = Vec::new();
        {
            let entries = self.entries.read().map_err(|_| ConfigError::LockPoisoned)?;
            let mut orphans = self.orphans.write().map_err(|_| ConfigError::LockPoisoned)?;
            for (definition, value) in persisted {
                match entries.get(&definition) {
                    Some(entry) => updates.push((Arc::clone(entry), value)),
                    None => {
                        orphans.insert(definition, value);
                    }
                }
            }
        }

        let changed = updates
            .iter()
            .filter(|(entry, value)| entry.load_persisted(value))
            .count();

        debug!(
            target: "config::file",
            path = %self.path.display(),
            changed,
            "Reloaded config"
        );
        Ok(changed)
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Persisted configuration store.
///
/// Cloning is cheap; clones share the same entries and file.
#[derive(Clone)]
pub struct ConfigFile {
    shared: Arc<StoreShared>,
}

impl ConfigFile {
    /// Open a config file. A missing file is treated as empty and is created
    /// on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let orphans: BTreeMap<ConfigDefinition, toml::Value> =
            read_document(&path)?.unwrap_or_default().into_iter().collect();

        debug!(
            target: "config::file",
            path = %path.display(),
            persisted = orphans.len(),
            "Opened config"
        );

        Ok(Self {
            shared: Arc::new(StoreShared {
                path,
                entries: RwLock::new(BTreeMap::new()),
                orphans: RwLock::new(orphans),
                save_on_set: AtomicBool::new(true),
                io: Mutex::new(()),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Bind an unconstrained entry. See [`ConfigFile::bind_with`].
    pub fn bind<T: ConfigValue>(
        &self,
        section: &str,
        key: &str,
        default: T,
        description: impl Into<String>,
    ) -> Result<ConfigEntry<T>> {
        self.bind_inner(section, key, default, description.into(), None)
    }

    /// Bind an entry constrained to an acceptable set of values.
    ///
    /// Binding the same (section, key) twice returns the entry created by the
    /// first call; the later default, description and constraint are ignored.
    /// The initial value is the persisted one when present, otherwise the
    /// default, clamped to the constraint either way.
    pub fn bind_with<T, A>(
        &self,
        section: &str,
        key: &str,
        default: T,
        description: impl Into<String>,
        acceptable: A,
    ) -> Result<ConfigEntry<T>>
    where
        T: ConfigValue,
        A: AcceptableValues<T> + 'static,
    {
        self.bind_inner(
            section,
            key,
            default,
            description.into(),
            Some(Arc::new(acceptable)),
        )
    }

    fn bind_inner<T: ConfigValue>(
        &self,
        section: &str,
        key: &str,
        default: T,
        description: String,
        acceptable: Option<Arc<dyn AcceptableValues<T>>>,
    ) -> Result<ConfigEntry<T>> {
        let definition = ConfigDefinition::new(section, key);

        let entry = {
            let mut entries = self
                .shared
                .entries
                .write()
                .map_err(|_| ConfigError::LockPoisoned)?;

            if let Some(existing) = entries.get(&definition) {
                return existing
                    .as_any()
                    .downcast_ref::<ConfigEntry<T>>()
                    .cloned()
                    .ok_or_else(|| ConfigError::TypeMismatch {
                        definition: definition.to_string(),
                        bound: existing.type_name(),
                        requested: T::TYPE_NAME,
                    });
            }

            let persisted = self
                .shared
                .orphans
                .write()
                .map_err(|_| ConfigError::LockPoisoned)?
                .remove(&definition);

            let initial = match persisted.as_ref().map(|value| (value, T::from_toml(value))) {
                Some((_, Some(parsed))) => parsed,
                Some((value, None)) => {
                    warn!(
                        target: "config::file",
                        entry = %definition,
                        expected = T::TYPE_NAME,
                        found = %value,
                        "Persisted value has the wrong type, using default"
                    );
                    default.clone()
                }
                None => default.clone(),
            };

            let entry = ConfigEntry::new(
                definition.clone(),
                description,
                default,
                acceptable,
                initial,
                Arc::downgrade(&self.shared),
            );
            entries.insert(definition, Arc::new(entry.clone()));
            entry
        };

        self.shared.autosave();
        Ok(entry)
    }

    /// Look up an already bound entry.
    pub fn get<T: ConfigValue>(&self, section: &str, key: &str) -> Option<ConfigEntry<T>> {
        let entries = self.shared.entries.read().ok()?;
        entries
            .get(&ConfigDefinition::new(section, key))?
            .as_any()
            .downcast_ref::<ConfigEntry<T>>()
            .cloned()
    }

    /// Number of bound entries.
    pub fn len(&self) -> usize {
        self.shared.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enable or disable saving after every bind and set.
    ///
    /// Disable during bulk binding and call [`ConfigFile::save`] once at the end.
    pub fn set_save_on_set(&self, enabled: bool) {
        self.shared.save_on_set.store(enabled, Ordering::Release);
    }

    pub fn save_on_set(&self) -> bool {
        self.shared.save_on_set.load(Ordering::Acquire)
    }

    /// Write every bound entry and every unbound persisted value to disk.
    pub fn save(&self) -> Result<()> {
        self.shared.save()
    }

    /// Re-read the file and apply persisted values to bound entries.
    ///
    /// Changed entries notify their subscribers. Returns the number of
    /// entries whose value changed.
    pub fn reload(&self) -> Result<usize> {
        self.shared.reload()
    }
}

fn read_document(path: &Path) -> Result<Option<Vec<(ConfigDefinition, toml::Value)>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let table: toml::Table = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    for (section, value) in table {
        match value {
            toml::Value::Table(keys) => {
                for (key, value) in keys {
                    values.push((ConfigDefinition::new(section.as_str(), key), value));
                }
            }
            other => warn!(
                target: "config::file",
                key = %section,
                value = %other,
                "Ignoring value outside of any section"
            ),
        }
    }

    Ok(Some(values))
}

fn render_document(
    entries: &BTreeMap<ConfigDefinition, Arc<dyn ErasedEntry>>,
    orphans: &BTreeMap<ConfigDefinition, toml::Value>,
) -> String {
    enum Line {
        Bound(RenderedEntry),
        Orphan(toml::Value),
    }

    let mut sections: BTreeMap<&str, Vec<(&str, Line)>> = BTreeMap::new();
    for (definition, entry) in entries {
        sections
            .entry(definition.section.as_str())
            .or_default()
            .push((definition.key.as_str(), Line::Bound(entry.render())));
    }
    for (definition, value) in orphans {
        sections
            .entry(definition.section.as_str())
            .or_default()
            .push((definition.key.as_str(), Line::Orphan(value.clone())));
    }

    let mut out = String::new();
    out.push_str(FILE_HEADER);
    out.push_str("\n\n");

    for (section, lines) in sections {
        out.push_str(&format!("[{}]\n\n", format_key(section)));
        for (key, line) in lines {
            match line {
                Line::Bound(rendered) => {
                    for description in rendered.description.lines() {
                        out.push_str(&format!("## {}\n", description));
                    }
                    out.push_str(&format!("# Setting type: {}\n", rendered.type_name));
                    out.push_str(&format!("# Default value: {}\n", rendered.default));
                    if let Some(acceptable) = rendered.acceptable {
                        out.push_str(&format!("# Acceptable values: {}\n", acceptable));
                    }
                    out.push_str(&format!("{} = {}\n\n", format_key(key), rendered.value));
                }
                Line::Orphan(value) => {
                    out.push_str(&format!("{} = {}\n\n", format_key(key), value));
                }
            }
        }
    }

    out
}

/// Bare keys are written as-is, anything else is quoted.
fn format_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        toml::Value::String(key.to_string()).to_string()
    }
}
