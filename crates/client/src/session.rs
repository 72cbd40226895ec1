//! A running world whose templates are kept in sync with the settings file.

use anyhow::Result;
use game_core::{EntityInstance, TemplateStore};
use tracing::info;
use tweak_config::{ConfigFile, ConfigWatcher};
use tweak_runtime::MonsterTweaks;

use crate::builder::SessionBuilder;
use crate::config::ClientConfig;

/// Host side of the tuning runtime: owns the templates and forwards world
/// and spawn events to [`MonsterTweaks`].
pub struct Session {
    config: ClientConfig,
    store: TemplateStore,
    file: ConfigFile,
    tweaks: MonsterTweaks,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(crate) fn new(
        config: ClientConfig,
        store: TemplateStore,
        file: ConfigFile,
        tweaks: MonsterTweaks,
    ) -> Self {
        Self {
            config,
            store,
            file,
            tweaks,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_file(&self) -> &ConfigFile {
        &self.file
    }

    pub fn tweaks(&self) -> &MonsterTweaks {
        &self.tweaks
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Bind every eligible template. Returns the number bound.
    pub fn start(&self) -> Result<usize> {
        Ok(self.tweaks.on_world_start(&self.store)?)
    }

    /// Spawn an instance and run the instance hooks on it.
    pub fn spawn(&self, name: &str) -> Result<Option<EntityInstance>> {
        let Some(mut instance) = self.store.spawn(name) else {
            return Ok(None);
        };
        self.tweaks.on_instance_start(&mut instance)?;
        Ok(Some(instance))
    }

    /// Log the live values of every bound template and of a fresh instance.
    pub fn report(&self) -> Result<()> {
        for name in self.store.names() {
            let Some(binding) = self.tweaks.binding(name) else {
                continue;
            };
            let Some(instance) = self.spawn(name)? else {
                continue;
            };

            if let Some(ai) = &instance.ai {
                info!(
                    template = name,
                    aggression = binding.aggression.value(),
                    evasion = binding.evasion.value(),
                    circle_target_distance = ai.circle_target_distance,
                    circle_target_duration = ai.circle_target_duration,
                    circle_target_interval = ai.circle_target_interval,
                    min_attack_interval = ai.min_attack_interval,
                    "Tuned template"
                );
            }

            let weapons = instance
                .character
                .iter()
                .filter_map(|character| character.as_humanoid())
                .flat_map(|humanoid| humanoid.inventory().all_items())
                .filter(|item| item.is_weapon() && item.is_equipable());
            for item in weapons {
                info!(
                    template = name,
                    item = %item.name,
                    ai_attack_interval = item.shared.ai_attack_interval,
                    "Spawned weapon"
                );
            }
        }
        Ok(())
    }

    /// Keep running until Ctrl+C, reloading the settings file on edits when
    /// watching is enabled. The world is unloaded and the settings saved on
    /// the way out.
    pub async fn run(self) -> Result<()> {
        let _watcher = if self.config.watch {
            Some(ConfigWatcher::spawn(self.file.clone())?)
        } else {
            None
        };

        info!("Press Ctrl+C to exit");
        tokio::signal::ctrl_c().await?;

        let unbound = self.tweaks.on_world_unload()?;
        self.file.save()?;
        info!(unbound, "Session shutdown complete");
        Ok(())
    }
}
