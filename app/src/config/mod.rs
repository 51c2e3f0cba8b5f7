//! Configuration management: defaults, validation, loading from environment + overrides.

pub mod app_config;
pub mod defaults;
pub mod manager;
pub mod validation;

pub use app_config::AppConfig;
pub use manager::SettingsManager;

use serde::{Deserialize, Serialize};

/// Where a setting's effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    Default,
    Environment,
    Override,
}

/// A resolved setting as reported by `dotify settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingInfo {
    pub key: String,
    pub value: String,
    pub source: SettingSource,
    pub description: String,
}

/// Problems found while resolving settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub invalid_settings: Vec<String>,
    pub warnings: Vec<String>,
}
