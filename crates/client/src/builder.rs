//! Session builder with dependency injection pattern.

use anyhow::{Context, Result};
use game_content::TemplateLoader;
use game_core::TemplateStore;
use tweak_config::ConfigFile;
use tweak_runtime::{HookRegistry, MonsterTweaks};

use crate::config::ClientConfig;
use crate::session::Session;

/// Builder for constructing a [`Session`].
///
/// Only the configuration is required. The template store defaults to the
/// catalog named by the configuration and the hooks to the default set.
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<ClientConfig>,
    store: Option<TemplateStore>,
    hooks: Option<HookRegistry>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (required).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an already loaded template store instead of the catalog file.
    pub fn store(mut self, store: TemplateStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build the Session.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is not set
    /// - The catalog cannot be loaded
    /// - The settings file exists but cannot be read
    pub fn build(self) -> Result<Session> {
        let config = self
            .config
            .context("Configuration is required. Use .config() to set it.")?;

        let store = match self.store {
            Some(store) => store,
            None => TemplateLoader::load_store(&config.catalog_path).with_context(|| {
                format!("Failed to load catalog {}", config.catalog_path.display())
            })?,
        };

        let file = ConfigFile::open(&config.config_path).with_context(|| {
            format!("Failed to open settings {}", config.config_path.display())
        })?;

        let tweaks = MonsterTweaks::with_hooks(
            file.clone(),
            config.tweaks.clone(),
            self.hooks.unwrap_or_default(),
        );

        Ok(Session::new(config, store, file, tweaks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Character, EntityTemplate, Faction, ItemData, ItemType, MonsterAi};
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> ClientConfig {
        ClientConfig {
            config_path: dir.path().join("MonsterAITweaks.toml"),
            catalog_path: dir.path().join("missing.ron"),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn build_requires_config() {
        assert!(SessionBuilder::new().build().is_err());
    }

    #[test]
    fn build_reports_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let Err(err) = SessionBuilder::new().config(config(&dir)).build() else {
            panic!("building without a catalog should fail");
        };
        assert!(format!("{err:#}").contains("missing.ron"));
    }

    #[test]
    fn session_spawns_tuned_instances() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::from_templates([EntityTemplate::new("Dverger")
            .with_ai(MonsterAi::new(8.0, 3.0, 2.0, 1.0))
            .with_character(Character::humanoid(
                Faction::Dverger,
                vec![ItemData::new("DvergerStaff", ItemType::TwoHandedWeapon, 3.0)],
            ))]);

        let session = SessionBuilder::new()
            .config(config(&dir))
            .store(store)
            .build()
            .unwrap();
        assert_eq!(session.start().unwrap(), 1);

        session
            .config_file()
            .get::<f32>("Dverger", "Aggression")
            .unwrap()
            .set(3.0);

        let instance = session.spawn("Dverger").unwrap().unwrap();
        let items = instance.character.unwrap().humanoid.unwrap().inventory;
        assert!((items.all_items()[0].shared.ai_attack_interval - 1.0).abs() < 1e-6);
        assert!(session.spawn("Unknown").unwrap().is_none());
    }
}
