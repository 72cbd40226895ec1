//! Binary configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tweak_runtime::TweakSettings;

pub const APP_NAME: &str = "monster-tweaks";
pub const CONFIG_FILE_NAME: &str = "MonsterAITweaks.toml";
pub const DEFAULT_CATALOG_PATH: &str = "content/monsters.ron";

/// Configuration required to bootstrap a tuning session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Persisted settings file.
    pub config_path: PathBuf,
    /// RON catalog of the templates to load.
    pub catalog_path: PathBuf,
    /// Reload the settings file whenever it is edited.
    pub watch: bool,
    pub session_id: Option<String>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
    pub tweaks: TweakSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            watch: false,
            session_id: None,
            log_dir: None,
            tweaks: TweakSettings::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TWEAKS_CONFIG_PATH` - Settings file (default: platform config dir)
    /// - `TWEAKS_CATALOG_PATH` - Template catalog (default: `content/monsters.ron`)
    /// - `TWEAKS_WATCH` - Reload the settings file on edits (default: false)
    /// - `TWEAKS_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `TWEAKS_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `TWEAKS_IGNORED`, `TWEAKS_BIND_FACTION`, `TWEAKS_BIND_TIMINGS` - see [`TweakSettings::from_env`]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TWEAKS_CONFIG_PATH") {
            config.config_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("TWEAKS_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        // A bare `TWEAKS_WATCH` counts as enabled
        if let Some(watch) = read_env::<bool>("TWEAKS_WATCH") {
            config.watch = watch;
        } else if env::var("TWEAKS_WATCH").is_ok() {
            config.watch = true;
        }

        config.session_id = env::var("TWEAKS_SESSION_ID").ok();
        config.log_dir = env::var("TWEAKS_LOG_DIR").ok().map(PathBuf::from);
        config.tweaks = TweakSettings::from_env();

        config
    }
}

/// `<platform config dir>/monster-tweaks/MonsterAITweaks.toml`, or the
/// working directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
