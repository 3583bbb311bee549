//! Layered configuration loader.
//!
//! Layers, lowest precedence first: system, user, project root, cwd, then any
//! runtime files named on the command line. Each layer is schema-checked on
//! its own so errors point at the file that caused them; the merged value is
//! then deserialized and validated as a whole.

mod layer;
mod merge;
mod schema;

#[cfg(test)]
mod tests;

use crate::{BoxOfficeConfig, ConfigError};
use directories::UserDirs;
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name looked up in every discovered layer directory.
const CONFIG_FILE: &str = "boxoffice.json5";
/// Directory under the user's home holding the user layer.
const USER_CONFIG_DIR: &str = ".boxoffice";
/// Entry marking a project root.
const PROJECT_MARKER: &str = ".git";

#[cfg(unix)]
const SYSTEM_CONFIG_PATH: &str = "/etc/boxoffice/boxoffice.json5";
#[cfg(windows)]
const SYSTEM_CONFIG_PATH: &str = "C:\\ProgramData\\boxoffice\\boxoffice.json5";

/// Effective config plus the layers that produced it.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: BoxOfficeConfig,
    /// Layers that were found, in the order they were applied.
    pub layers: Vec<ConfigLayer>,
}

/// Where a config layer was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    System,
    User,
    /// Nearest ancestor of the cwd containing `.git`.
    Project,
    Cwd,
    /// Files passed with `--config`; these must exist.
    Runtime,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            ConfigLayerSource::System => "system",
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Project => "project",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

/// A layer that contributed to the effective config.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Layer locations used by [`BoxOfficeConfig::load_layered_with_options`].
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory the cwd and project layers are resolved from.
    pub cwd: PathBuf,
    pub system_config_path: Option<PathBuf>,
    pub user_config_path: Option<PathBuf>,
    /// Applied after every discovered layer, in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Default system and user locations, local layers resolved from `cwd`.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: Some(PathBuf::from(SYSTEM_CONFIG_PATH)),
            user_config_path: UserDirs::new()
                .map(|dirs| dirs.home_dir().join(USER_CONFIG_DIR).join(CONFIG_FILE)),
            runtime_paths: Vec::new(),
        }
    }

    /// Add a runtime layer applied after everything discovered.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Optional layers in precedence order.
    fn discovered(&self) -> Vec<(ConfigLayerSource, PathBuf)> {
        let cwd = layer::identity(&self.cwd);
        let mut found = Vec::new();
        if let Some(path) = &self.system_config_path {
            found.push((ConfigLayerSource::System, path.clone()));
        }
        if let Some(path) = &self.user_config_path {
            found.push((ConfigLayerSource::User, path.clone()));
        }
        match layer::project_root(&cwd) {
            Some(root) => found.push((ConfigLayerSource::Project, root.join(CONFIG_FILE))),
            None => debug!("no project root above {}", cwd.display()),
        }
        found.push((ConfigLayerSource::Cwd, cwd.join(CONFIG_FILE)));
        found
    }
}

impl BoxOfficeConfig {
    /// Load, merge and validate every config layer.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut merged = Value::Object(Map::new());
        let mut applied = Vec::new();
        let mut seen = HashSet::new();

        for (source, path) in options.discovered() {
            // The project root is often the cwd itself.
            if !seen.insert(layer::identity(&path)) {
                continue;
            }
            if let Some(loaded) = layer::read_optional(source, &path)? {
                merge::merge_json_values(&mut merged, &loaded.value);
                applied.push(loaded.meta);
            }
        }
        for path in &options.runtime_paths {
            let loaded = layer::read(ConfigLayerSource::Runtime, path)?;
            merge::merge_json_values(&mut merged, &loaded.value);
            applied.push(loaded.meta);
        }

        let config: BoxOfficeConfig = serde_json::from_value(merged)?;
        config.validate()?;
        info!(
            "config loaded (layers={}, endpoint={})",
            applied.len(),
            config.service.submit_url()
        );
        Ok(LayeredConfig {
            config,
            layers: applied,
        })
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.service.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("service.base_url", "expected http:// or https:// URL"));
        }
        if !self.service.submit_path.starts_with('/') {
            return Err(invalid(
                "service.submit_path",
                "expected path starting with '/'",
            ));
        }
        let key = &self.history.storage_key;
        if key.trim().is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(invalid("history.storage_key", "expected a plain file stem"));
        }
        Ok(())
    }
}

fn invalid(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}
