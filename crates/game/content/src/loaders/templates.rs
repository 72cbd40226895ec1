//! Entity template catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{EntityTemplate, MonsterAi, TemplateStore};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Template catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub templates: Vec<EntityTemplate>,
}

/// Loader for entity template catalogs from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load a template catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a TemplateCatalog
    ///
    /// # Returns
    ///
    /// Returns the validated templates in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<EntityTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid template catalog {}: {}", path.display(), e))
    }

    /// Load a template catalog and wrap it in an in-memory host.
    pub fn load_store(path: &Path) -> LoadResult<TemplateStore> {
        Ok(TemplateStore::from_templates(Self::load(path)?))
    }

    /// Parse and validate a catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<EntityTemplate>> {
        let catalog: TemplateCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &catalog.templates {
            if template.name.trim().is_empty() {
                anyhow::bail!("template with empty name");
            }
            if !seen.insert(template.name.as_str()) {
                anyhow::bail!("duplicate template '{}'", template.name);
            }
            if let Some(ai) = &template.ai {
                validate_ai(&template.name, ai)?;
            }
        }

        Ok(catalog.templates)
    }
}

fn validate_ai(name: &str, ai: &MonsterAi) -> LoadResult<()> {
    let fields = [
        ("circle_target_distance", ai.circle_target_distance),
        ("circle_target_duration", ai.circle_target_duration),
        ("circle_target_interval", ai.circle_target_interval),
        ("min_attack_interval", ai.min_attack_interval),
        ("random_move_range", ai.random_move_range),
    ];

    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("template '{}' has invalid {} = {}", name, field, value);
        }
    }

    Ok(())
}
