// ABOUTME: Optional TOML configuration for the diff command
// ABOUTME: File values apply only where the CLI left a setting unspecified

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings readable from a TOML config file
///
/// ```toml
/// show_types = false
/// include_tables = ["customers", "orders"]
/// exclude_tables = ["audit_log"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiffConfig {
    pub show_types: Option<bool>,
    pub include_tables: Option<Vec<String>>,
    pub exclude_tables: Option<Vec<String>>,
}

/// Final settings after merging CLI flags over config values
#[derive(Debug, Clone)]
pub struct DiffSettings {
    pub show_types: bool,
    pub include_tables: Option<Vec<String>>,
    pub exclude_tables: Option<Vec<String>>,
}

impl DiffConfig {
    /// Merge CLI arguments over this config, field by field
    ///
    /// `--no-types` can only turn type output off; when the flag is
    /// absent the config decides, defaulting to on. Include/exclude
    /// lists from the CLI replace the config's lists entirely.
    pub fn resolve(
        self,
        no_types: bool,
        include_tables: Option<Vec<String>>,
        exclude_tables: Option<Vec<String>>,
    ) -> DiffSettings {
        DiffSettings {
            show_types: if no_types {
                false
            } else {
                self.show_types.unwrap_or(true)
            },
            include_tables: include_tables.or(self.include_tables),
            exclude_tables: exclude_tables.or(self.exclude_tables),
        }
    }
}

/// Load a config file, or defaults when no path was given
pub fn load_config(path: Option<&Path>) -> Result<DiffConfig> {
    let Some(path) = path else {
        return Ok(DiffConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: DiffConfig = toml::from_str(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    Ok(config)
}
