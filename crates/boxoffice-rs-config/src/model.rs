//! Configuration schema for the box-office client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base URL of the prediction service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default path of the prediction endpoint.
pub const DEFAULT_SUBMIT_PATH: &str = "/api/submit";
/// Default directory holding the history file.
pub const DEFAULT_HISTORY_DIR: &str = ".boxoffice/history";
/// Default storage key, used as the history file stem.
pub const DEFAULT_STORAGE_KEY: &str = "predictions";

/// Root config for the box-office client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoxOfficeConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Location of the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_path: default_submit_path(),
        }
    }
}

impl ServiceConfig {
    /// Full URL of the prediction endpoint.
    pub fn submit_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.submit_path
        )
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_submit_path() -> String {
    DEFAULT_SUBMIT_PATH.to_string()
}

/// Where prediction history is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            storage_key: default_storage_key(),
        }
    }
}

impl HistoryConfig {
    /// Directory holding the history file, falling back to the default.
    pub fn dir(&self) -> PathBuf {
        PathBuf::from(
            self.path
                .clone()
                .unwrap_or_else(|| DEFAULT_HISTORY_DIR.to_string()),
        )
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::{HistoryConfig, ServiceConfig};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn submit_url_joins_without_double_slash() {
        let service = ServiceConfig {
            base_url: "http://predict.local:9000/".to_string(),
            submit_path: "/api/submit".to_string(),
        };
        assert_eq!(service.submit_url(), "http://predict.local:9000/api/submit");
    }

    #[test]
    fn history_dir_falls_back_to_default() {
        let mut history = HistoryConfig::default();
        assert_eq!(history.dir(), PathBuf::from(".boxoffice/history"));
        history.path = Some("/tmp/boxoffice".to_string());
        assert_eq!(history.dir(), PathBuf::from("/tmp/boxoffice"));
        assert_eq!(history.storage_key, "predictions");
    }
}
