//! Host binary support for the monster tuning runtime.
//!
//! # Architecture
//!
//! ```text
//! Session (composition root)
//!   ├─→ TemplateStore (templates loaded from the RON catalog)
//!   ├─→ ConfigFile (persisted settings, optionally watched)
//!   └─→ MonsterTweaks (bindings, override engine, instance hooks)
//! ```

pub mod config;
pub mod logging;

mod builder;
mod session;

pub use builder::SessionBuilder;
pub use config::ClientConfig;
pub use session::Session;
