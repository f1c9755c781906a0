//! Configuration file discovery and loading.
//!
//! Files are merged in this order (later overrides earlier):
//! 1. User global config (`~/.envload/config.yml`)
//! 2. Project config (`.envload/config.yml`)
//! 3. Local overrides (`.envload/config.local.yml`)
//!
//! None of them is required.

use crate::config::merger::merge_configs;
use crate::config::schema::EnvloadConfig;
use crate::config::validator::validate;
use crate::error::{EnvloadError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.envload/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .envload/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .envload/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let user_global = dirs::home_dir().map(|h| h.join(".envload").join("config.yml"));
        Self {
            user_global: user_global.filter(|p| p.is_file()),
            project: existing(project_root.join(".envload").join("config.yml")),
            project_local: existing(project_root.join(".envload").join("config.local.yml")),
        }
    }

    /// All existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.envload` directory, falling back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".envload").is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read a config file as a raw YAML value.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvloadError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvloadError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Null);
    }

    serde_yaml::from_str(&content).map_err(|e| EnvloadError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<EnvloadConfig> {
    let value = load_config_value(path)?;
    parse_value(value, path)
}

/// Discover, merge and parse all config files for a project.
pub fn load_merged_config(project_root: &Path) -> Result<EnvloadConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    let mut layers = Vec::with_capacity(existing.len());
    for path in &existing {
        tracing::debug!("Loading config from {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let report_path = existing
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| project_root.join(".envload").join("config.yml"));
    parse_value(merge_configs(&layers), &report_path)
}

/// Load config with an optional explicit file.
///
/// An explicit file is loaded on its own and must exist. Otherwise all
/// discovered files are merged. The result is validated either way.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<EnvloadConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => load_merged_config(project_root)?,
    };
    validate(&config)?;
    Ok(config)
}

fn parse_value(value: serde_yaml::Value, path: &Path) -> Result<EnvloadConfig> {
    if value.is_null() {
        return Ok(EnvloadConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| EnvloadError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
