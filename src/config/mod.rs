//! # Configuration
//!
//! Generator settings are read from `jfw-codegen.toml`. Resolution order:
//!
//! 1. `--config <FILE>` on the command line
//! 2. `jfw-codegen.toml` in the working directory
//! 3. Built-in defaults
//!
//! A `jfw-codegen.local.toml` next to the resolved file is merged on top of it.
//! Tables merge key by key, scalars and lists are replaced. Environment
//! variables are applied last:
//!
//! | Variable | Field |
//! |---|---|
//! | `JFW_GEN_OUTPUT_DIR` | `paths.output` |
//! | `JFW_GEN_FRAMEWORK_DIR` | `paths.framework` |
//! | `JFW_GEN_TABLE_SCHEMA` | `table_schema` |
//! | `JFW_GEN_AUTHOR_NAME` | `author.full_name` |
//! | `JFW_GEN_AUTHOR_CODE` | `author.dev_code` |

mod error;
mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use types::*;

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jfw-codegen.toml";
/// Override file merged over the main config
pub const LOCAL_CONFIG_FILE_NAME: &str = "jfw-codegen.local.toml";

/// Sample configuration written by `jfw-gen init`
pub const SAMPLE_CONFIG: &str = include_str!("../../config/jfw-codegen.toml");

/// Resolve the config file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. `jfw-codegen.toml` in `base_dir`
/// 3. None (built-in defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let candidate = base_dir.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Load configuration from a TOML file, merging the local override file
///
/// Returns `Ok(None)` if the file doesn't exist (not an error) and `Err` if it
/// exists but fails to parse.
pub fn load_config_file(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let mut value = read_toml(config_path)?;
    let local_path = config_path
        .parent()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE_NAME))
        .filter(|p| p.exists());
    if let Some(local_path) = local_path {
        let local = read_toml(&local_path)?;
        merge_toml(&mut value, local);
        tracing::info!(path = %local_path.display(), "Local configuration loaded");
    }

    let config = value
        .try_into::<GeneratorConfig>()
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// Resolve, load, apply environment overrides and validate
pub fn load_config(explicit_path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let base_dir = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = match resolve_config_path(explicit_path, &base_dir) {
        Some(path) => {
            let loaded = load_config_file(&path)?;
            match loaded {
                Some(config) => {
                    tracing::debug!(path = %path.display(), "Configuration loaded");
                    config
                }
                None => anyhow::bail!("Config file not found: {}", path.display()),
            }
        }
        None => {
            tracing::debug!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
            GeneratorConfig::default()
        }
    };
    config.fill_type_mapping();
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Write the sample configuration only if the file does not exist
///
/// Returns `true` when the file was written.
pub fn write_config_if_missing(config_path: &Path) -> anyhow::Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {}", config_path.display()))?;
    }
    std::fs::write(config_path, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    Ok(true)
}

fn read_toml(path: &Path) -> anyhow::Result<toml::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Deep-merge `overlay` into `base`: tables merge, everything else is replaced.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

impl GeneratorConfig {
    /// Apply `JFW_GEN_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("JFW_GEN_OUTPUT_DIR") {
            self.paths.output = PathBuf::from(v);
        }
        if let Some(v) = lookup("JFW_GEN_FRAMEWORK_DIR") {
            self.paths.framework = PathBuf::from(v);
        }
        if let Some(v) = lookup("JFW_GEN_TABLE_SCHEMA") {
            self.table_schema = v;
        }
        if let Some(v) = lookup("JFW_GEN_AUTHOR_NAME") {
            self.author.full_name = v;
        }
        if let Some(v) = lookup("JFW_GEN_AUTHOR_CODE") {
            self.author.dev_code = v;
        }
    }

    /// Add built-in SQL types missing from a user supplied `type_mapping`
    pub fn fill_type_mapping(&mut self) {
        for (sql, dot_net) in default_type_mapping() {
            self.type_mapping.entry(sql).or_insert(dot_net);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_schema.trim().is_empty() {
            return Err(ConfigError::EmptyTableSchema);
        }
        for suffix in self
            .included_core_suffixes
            .iter()
            .chain(&self.excluded_core_suffixes)
        {
            if !CORE_SUFFIXES.contains(&suffix.as_str()) {
                return Err(ConfigError::UnknownCoreSuffix {
                    suffix: suffix.clone(),
                });
            }
        }
        for (parent, custom) in &self.procedures {
            for child in &custom.child_tables {
                match self.child_tables.get(child) {
                    None => {
                        return Err(ConfigError::MissingChildTable {
                            parent: parent.clone(),
                            child: child.clone(),
                        })
                    }
                    Some(c) if c.suffix.is_empty() => {
                        return Err(ConfigError::EmptyChildSuffix {
                            child: child.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
