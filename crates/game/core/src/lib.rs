//! Host model shared by the content loaders and the tweak runtime.
//!
//! `game-core` describes the slice of the game world the tweak runtime needs to
//! see: entity templates, the components that carry tunable behavior, spawned
//! instances, and the [`TemplateOracle`] query surface. The runtime never owns
//! templates; it receives [`TemplateRef`] handles from an oracle and keeps only
//! weak references to them.
//!
//! Modules are organized by responsibility:
//! - [`template`] defines templates and the oracle trait used for discovery
//! - [`ai`], [`character`], [`item`] hold the per-template components
//! - [`instance`] models one live spawned entity
//! - [`store`] provides an in-memory host implementing the oracle
pub mod ai;
pub mod character;
pub mod instance;
pub mod item;
pub mod store;
pub mod template;
pub mod traits;

pub use ai::MonsterAi;
pub use character::{Character, Humanoid, Inventory};
pub use instance::EntityInstance;
pub use item::{ItemData, ItemType, SharedItemData};
pub use store::TemplateStore;
pub use template::{CLONE_SUFFIX, EntityTemplate, TemplateOracle, TemplateRef, prefab_name};
pub use traits::Faction;
