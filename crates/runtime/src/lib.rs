//! Behavior tuning for creature templates.
//!
//! This crate discovers the creature templates a host has loaded, binds a
//! set of persisted parameters for each of them, and keeps the templates in
//! sync with those parameters as they change. Consumers embed
//! [`MonsterTweaks`] and forward the host's world and spawn events to it.
//!
//! Modules are organized by responsibility:
//! - [`registry`] selects the templates eligible for tuning
//! - [`baseline`] captures unmodified values before any override
//! - [`binder`] and [`binding`] create entries and map them back to templates
//! - [`engine`] turns entry changes into template mutations
//! - [`hooks`] patches per-instance state when entities spawn
pub mod baseline;
pub mod binder;
pub mod binding;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod parameter;
pub mod registry;
pub mod settings;
pub mod tweaks;

pub use baseline::BaselineSnapshot;
pub use binder::Binder;
pub use binding::{Binding, BindingTable, TemplateBinding, TimingEntries};
pub use engine::OverrideEngine;
pub use error::{HookError, Result, TweakError};
pub use hooks::{HookContext, HookCriticality, HookRegistry, InstanceHook, WeaponIntervalHook};
pub use parameter::{Parameter, ParameterValue};
pub use registry::EntityRegistry;
pub use settings::TweakSettings;
pub use tweaks::MonsterTweaks;
