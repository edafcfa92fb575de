//! Configuration loader with tier-based merging.
//!
//! Each tier is read as a JSON value and folded over the previous ones, so a
//! file only has to mention the fields it changes.

use super::types::Config;
use crate::dates::CountdownMode;
use crate::format::OutputFormat;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults
    Defaults = 0,
    /// Project-level config (./todo-list/)
    Project = 1,
    /// User-level config (~/.todo-list/)
    User = 2,
    /// Environment variables
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

const CONFIG_FILE: &str = "config.yaml";

/// Where each tier lives.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Single file replacing the project and user tiers.
    pub explicit_file: Option<PathBuf>,
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover paths from the environment and the home directory.
    pub fn discover() -> Self {
        let explicit_file = std::env::var("TODO_LIST_CONFIG_PATH").ok().map(PathBuf::from);

        let project_dir = std::env::var("TODO_LIST_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("todo-list")));

        let user_dir = std::env::var("TODO_LIST_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".todo-list")));

        Self {
            explicit_file,
            project_dir,
            user_dir,
        }
    }

    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            explicit_file: None,
            project_dir,
            user_dir,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }
}

/// Loads and merges the configuration tiers.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: Config,
    /// Files that contributed, lowest tier first.
    sources: Vec<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    /// Load the file tiers from `paths`, then apply environment overrides.
    pub fn load(paths: ConfigPaths) -> Result<Self> {
        let mut loader = Self::load_with_paths(paths)?;
        loader.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(loader)
    }

    /// Load the file tiers from explicit paths. Environment overrides are
    /// not applied here.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        let mut merged = serde_json::to_value(Config::default())?;
        let mut sources = Vec::new();

        if let Some(ref file) = paths.explicit_file {
            let layer = read_layer(file)?
                .with_context(|| format!("config file {} not found", file.display()))?;
            merge_layer(&mut merged, layer);
            sources.push((ConfigTier::Project, file.clone()));
        } else {
            let tiers = [
                (ConfigTier::Project, paths.project_dir.as_deref()),
                (ConfigTier::User, paths.user_dir.as_deref()),
            ];
            for (tier, dir) in tiers {
                let Some(dir) = dir else { continue };
                let file = dir.join(CONFIG_FILE);
                match read_layer(&file) {
                    Ok(Some(layer)) => {
                        debug!(tier = %tier, path = %file.display(), "Loaded config tier");
                        merge_layer(&mut merged, layer);
                        sources.push((tier, file));
                    }
                    Ok(None) => {}
                    Err(e) => warn!(tier = %tier, path = %file.display(), error = %e, "Ignoring unreadable config"),
                }
            }
        }

        let config: Config =
            serde_json::from_value(merged).context("invalid configuration")?;
        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Apply `TODO_LIST_FORMAT` and `TODO_LIST_COUNTDOWN`. Unknown values are
    /// ignored with a warning.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("TODO_LIST_FORMAT") {
            match OutputFormat::from_str(&value) {
                Some(format) => self.config.display.format = format,
                None => warn!(value = %value, tier = %ConfigTier::Environment, "Unknown TODO_LIST_FORMAT"),
            }
        }
        if let Some(value) = lookup("TODO_LIST_COUNTDOWN") {
            match CountdownMode::from_str(&value) {
                Some(mode) => self.config.display.countdown = mode,
                None => warn!(value = %value, tier = %ConfigTier::Environment, "Unknown TODO_LIST_COUNTDOWN"),
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn sources(&self) -> &[(ConfigTier, PathBuf)] {
        &self.sources
    }
}

/// Read one YAML file as a JSON value. `Ok(None)` if it does not exist.
fn read_layer(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

/// Fold `layer` into `base` in place.
///
/// Maps merge key by key; anything else in `layer` replaces `base`. A null in
/// `layer` means "not set" and keeps `base`.
pub fn merge_layer(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_layer(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
