//! Logging setup: file output plus a level that follows the settings file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};
use tweak_config::{ConfigEntry, ConfigFile, LogLevel};

use crate::config::APP_NAME;

/// Keeps the file writer alive and allows the level to change at runtime.
pub struct Logging {
    _guard: WorkerGuard,
    filter: reload::Handle<EnvFilter, Registry>,
    log_file: PathBuf,
}

/// Setup logging to both stderr and a per-session file.
pub fn setup_logging(session_id: Option<&str>, log_dir: Option<&Path>) -> Result<Logging> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(log_directory);

    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("Failed to create {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "monster-tweaks.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let (filter_layer, filter) = reload::Layer::new(level_filter(LogLevel::default()));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let log_file = session_log_dir.join("monster-tweaks.log");
    info!("Logging initialized: session={}", session_id);
    info!("Log file: {}", log_file.display());

    Ok(Logging {
        _guard: guard,
        filter,
        log_file,
    })
}

impl Logging {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        self.filter
            .reload(level_filter(level))
            .context("Failed to reload log filter")
    }

    /// Bind `Global.Verbosity` and keep the log level in sync with it.
    pub fn follow_verbosity(&self, config: &ConfigFile) -> Result<ConfigEntry<LogLevel>> {
        let verbosity = config.bind(
            "Global",
            "Verbosity",
            LogLevel::Low,
            "Log verbosity. Medium logs every applied override, High also logs skipped templates and items.",
        )?;
        self.set_level(verbosity.value())?;

        let filter = self.filter.clone();
        verbosity.on_changed(move |entry| {
            let level = entry.value();
            match filter.reload(level_filter(level)) {
                Ok(()) => info!(?level, "Log verbosity changed"),
                Err(e) => warn!(error = %e, "Failed to change log verbosity"),
            }
        });

        Ok(verbosity)
    }
}

/// `RUST_LOG` directives on top of the verbosity's default level.
fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.as_tracing_level().into())
        .from_env_lossy()
}

/// Get the platform-specific log directory
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME).join("logs"))
}
