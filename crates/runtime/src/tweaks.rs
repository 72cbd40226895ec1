//! Lifecycle entry points driven by the host.
use std::sync::{Arc, PoisonError};

use game_core::{EntityInstance, TemplateOracle, TemplateRef};
use tracing::{debug, info, warn};
use tweak_config::{ConfigFile, EntryId};

use crate::binder::Binder;
use crate::binding::{Binding, BindingTable, TemplateBinding};
use crate::engine::OverrideEngine;
use crate::error::{Result, TweakError};
use crate::hooks::{HookContext, HookRegistry};
use crate::registry::EntityRegistry;
use crate::settings::TweakSettings;

/// Keeps creature templates in sync with their persisted tuning.
///
/// The host calls [`on_world_start`](Self::on_world_start) once its template
/// universe is loaded, [`on_instance_start`](Self::on_instance_start) for
/// every spawned instance, and [`on_world_unload`](Self::on_world_unload)
/// when it tears the world down.
pub struct MonsterTweaks {
    config: ConfigFile,
    registry: EntityRegistry,
    binder: Binder,
    engine: OverrideEngine,
    hooks: HookRegistry,
}

impl MonsterTweaks {
    pub fn new(config: ConfigFile, settings: TweakSettings) -> Self {
        Self::with_hooks(config, settings, HookRegistry::default())
    }

    pub fn with_hooks(config: ConfigFile, settings: TweakSettings, hooks: HookRegistry) -> Self {
        let engine = OverrideEngine::new();
        Self {
            registry: EntityRegistry::new(settings.ignored.iter().cloned()),
            binder: Binder::new(config.clone(), settings, engine.clone()),
            config,
            engine,
            hooks,
        }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn engine(&self) -> &OverrideEngine {
        &self.engine
    }

    pub fn settings(&self) -> &TweakSettings {
        self.binder.settings()
    }

    /// Discover and bind every eligible template.
    ///
    /// Runs at most once per world: if the table is already populated this
    /// returns `Ok(0)` without touching anything. The config file is written
    /// once at the end rather than after every bind. Returns the number of
    /// templates bound; a template that fails to bind is logged and skipped.
    pub fn on_world_start(&self, oracle: &dyn TemplateOracle) -> Result<usize> {
        let mut table = self.engine.table().write().map_err(|_| TweakError::LockPoisoned)?;
        if !table.is_empty() {
            debug!(
                target: "runtime::tweaks",
                templates = table.template_count(),
                "Bindings already populated"
            );
            return Ok(0);
        }

        info!(target: "runtime::tweaks", "Initializing monster bindings");
        let templates = self.registry.discover(oracle);

        let save_on_set = self.config.save_on_set();
        self.config.set_save_on_set(false);
        let bound = self.bind_all(&mut table, &templates);
        let saved = self.config.save();
        self.config.set_save_on_set(save_on_set);
        saved?;

        info!(
            target: "runtime::tweaks",
            discovered = templates.len(),
            bound,
            armed = table.armed_count(),
            handles = table.len(),
            "Monster bindings ready"
        );
        Ok(bound)
    }

    /// Forget every binding; the next world start rediscovers.
    ///
    /// Templates that survive the unload keep their captured baseline.
    /// Returns the number of templates that were bound.
    pub fn on_world_unload(&self) -> Result<usize> {
        let mut table = self.engine.table().write().map_err(|_| TweakError::LockPoisoned)?;
        let bindings = table.clear();
        let count = bindings.len();
        self.binder.retain(bindings);

        info!(
            target: "runtime::tweaks",
            unbound = count,
            retained = self.binder.retained_count(),
            "Cleared monster bindings"
        );
        Ok(count)
    }

    /// Run the instance hooks against a freshly spawned instance.
    pub fn on_instance_start(&self, instance: &mut EntityInstance) -> Result<()> {
        let table = self.engine.table().read().map_err(|_| TweakError::LockPoisoned)?;
        self.hooks.execute(&HookContext::new(&table), instance)
    }

    /// Number of bound entry handles.
    pub fn bound_handles(&self) -> usize {
        self.engine
            .table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn bound_templates(&self) -> usize {
        self.engine
            .table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .template_count()
    }

    /// Resolve an entry handle to its parameter and template.
    pub fn lookup(&self, handle: EntryId) -> Option<Binding> {
        self.engine
            .table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(handle)
            .cloned()
    }

    /// Binding of a template by name.
    pub fn binding(&self, template: &str) -> Option<Arc<TemplateBinding>> {
        self.engine
            .table()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .template(template)
            .cloned()
    }

    /// A template that fails to bind is logged and skipped; the rest still bind.
    fn bind_all(&self, table: &mut BindingTable, templates: &[TemplateRef]) -> usize {
        let mut bound = 0;
        for template in templates {
            match self.binder.bind(table, template) {
                Ok(true) => bound += 1,
                Ok(false) => {}
                Err(error) => warn!(
                    target: "runtime::tweaks",
                    template = %template_name(template),
                    %error,
                    "Failed to bind template"
                ),
            }
        }
        bound
    }
}

fn template_name(template: &TemplateRef) -> String {
    template
        .read()
        .map(|guard| guard.name.clone())
        .unwrap_or_else(|_| String::from("<poisoned>"))
}
