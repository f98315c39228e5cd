//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: `<project_dir>/.orgtree.toml`
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{OrgTreeEditor, DEFAULT_MAX_FIELD_LEN, MIN_DEPTH_CEILING};

/// Raw settings for intermediate parsing (Option = not specified in this layer).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub max_field_len: Option<usize>,
    pub confirm_deletes: Option<bool>,
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Org chart JSON file (default: ~/.orgtree/orgchart.json)
    pub data_file: PathBuf,
    /// Ceiling for ancestor walks; values below 100 are raised to 100
    pub max_depth: usize,
    /// Maximum characters for a name or title
    pub max_field_len: usize,
    /// Ask before deleting a node and its reports
    pub confirm_deletes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_depth: MIN_DEPTH_CEILING,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            confirm_deletes: true,
        }
    }
}

fn default_data_file() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".orgtree").join("orgchart.json"))
        .unwrap_or_else(|| PathBuf::from("~/.orgtree/orgchart.json"))
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".orgtree.toml")
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Editor configured with this ceiling and field limit.
    pub fn editor(&self) -> OrgTreeEditor {
        OrgTreeEditor::new(self.max_depth, self.max_field_len)
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            max_field_len: overlay.max_field_len.unwrap_or(self.max_field_len),
            confirm_deletes: overlay.confirm_deletes.unwrap_or(self.confirm_deletes),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a `.orgtree.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("ORGTREE_MAX_DEPTH must be positive, got {}", val),
            })?;
        }
        if let Ok(val) = config.get_int("max_field_len") {
            settings.max_field_len =
                usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("ORGTREE_MAX_FIELD_LEN must be positive, got {}", val),
                })?;
        }
        if let Ok(val) = config.get_bool("confirm_deletes") {
            settings.confirm_deletes = val;
        }

        Ok(settings)
    }

    /// Render as TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            max_depth: Some(250),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.max_depth, 250);
        assert_eq!(merged.data_file, base.data_file);
        assert!(merged.confirm_deletes);
    }

    #[test]
    fn test_editor_raises_low_ceiling() {
        let settings = Settings {
            max_depth: 5,
            ..Settings::default()
        };
        assert_eq!(settings.editor().max_depth(), MIN_DEPTH_CEILING);
    }
}
