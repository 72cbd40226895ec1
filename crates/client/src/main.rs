//! Monster tuning host binary.
//!
//! Loads a template catalog, binds every eligible creature to the settings
//! file, reports the tuned values and keeps running so that edits to the
//! settings file (with `TWEAKS_WATCH=1`) are applied live.
//!
//! ```bash
//! TWEAKS_WATCH=1 cargo run -p tweak-client
//! ```

use anyhow::Result;
use tweak_client::{ClientConfig, Session, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let logging = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!("Starting monster-tweaks");
    tracing::info!("Settings: {}", config.config_path.display());
    tracing::info!("Catalog: {}", config.catalog_path.display());

    // 3. Build the session and follow the persisted verbosity
    let session = Session::builder().config(config).build()?;
    let _verbosity = logging.follow_verbosity(session.config_file())?;

    // 4. Bind templates and report
    let bound = session.start()?;
    tracing::info!("Bound {} templates", bound);
    session.report()?;

    // 5. Run until interrupted
    session.run().await
}
