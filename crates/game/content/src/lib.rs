//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for RON data files:
//! - Entity template catalogs (data-driven via RON)
//!
//! Content feeds the in-memory [`game_core::TemplateStore`] host; the tweak
//! runtime only ever sees it through [`game_core::TemplateOracle`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, TemplateCatalog, TemplateLoader};
