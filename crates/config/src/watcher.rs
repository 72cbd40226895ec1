//! Live reload of the config file when it is edited on disk.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::file::ConfigFile;

/// Watches a [`ConfigFile`] and reloads it whenever the file changes.
///
/// The parent directory is watched rather than the file itself, since most
/// editors replace files instead of writing in place. Watching stops when the
/// watcher is dropped.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn spawn(config: ConfigFile) -> Result<Self> {
        let path = config.path().to_path_buf();
        let file_name = path.file_name().map(OsStr::to_os_string);
        let dir = watch_dir(&path);

        fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) if is_relevant(&event, file_name.as_deref()) => {
                    debug!(target: "config::watcher", kind = ?event.kind, "Config file changed");
                    match config.reload() {
                        Ok(0) => {}
                        Ok(changed) => info!(
                            target: "config::watcher",
                            changed,
                            "Applied edited settings"
                        ),
                        Err(e) => warn!(
                            target: "config::watcher",
                            error = %e,
                            "Failed to reload config"
                        ),
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(target: "config::watcher", error = %e, "Watch error"),
            })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        info!(target: "config::watcher", path = %path.display(), "Watching config file");

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_relevant(event: &Event, file_name: Option<&OsStr>) -> bool {
    let Some(file_name) = file_name else {
        return false;
    };

    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn only_edits_of_the_watched_file_are_relevant() {
        let name = OsStr::new("tweaks.toml");

        assert!(is_relevant(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/tweaks.toml"),
            Some(name)
        ));
        assert!(is_relevant(
            &event(EventKind::Create(CreateKind::File), "/cfg/tweaks.toml"),
            Some(name)
        ));
        assert!(!is_relevant(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/tweaks.toml.tmp"),
            Some(name)
        ));
        assert!(!is_relevant(
            &event(EventKind::Remove(RemoveKind::File), "/cfg/tweaks.toml"),
            Some(name)
        ));
        assert!(!is_relevant(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/tweaks.toml"),
            None
        ));
    }

    #[test]
    fn watch_dir_defaults_to_current_dir() {
        assert_eq!(watch_dir(Path::new("tweaks.toml")), PathBuf::from("."));
        assert_eq!(watch_dir(Path::new("/cfg/tweaks.toml")), PathBuf::from("/cfg"));
    }
}
