//! SettingsManager: layered settings (overrides > environment > defaults) with validation.

use std::collections::HashMap;

use super::defaults::{self, DEFAULT_SETTINGS};
use super::validation::validate_setting;
use super::{ConfigStatus, SettingInfo, SettingSource};

/// Resolves setting values from explicit overrides, the environment and defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    env: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl SettingsManager {
    /// Capture `DOTIFY_*` environment variables for every known key.
    pub fn from_env() -> Self {
        let env = defaults::keys()
            .filter_map(|key| {
                std::env::var(defaults::env_key(key))
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key.to_string(), v))
            })
            .collect();
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// Build from an explicit environment map (keys without prefix).
    pub fn from_map(env: HashMap<String, String>) -> Self {
        Self {
            env,
            overrides: HashMap::new(),
        }
    }

    /// Set an override (e.g. from a command line flag) with validation.
    pub fn set_override(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        if !DEFAULT_SETTINGS.contains_key(key) {
            anyhow::bail!("unknown setting key: {key}");
        }
        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
        self.overrides.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Get a setting value. Invalid environment values fall back to the default.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        self.resolve(key)
            .map(|(value, _)| value)
            .ok_or_else(|| anyhow::anyhow!("setting not found: {key}"))
    }

    /// All settings with their effective values, in definition order.
    pub fn get_all_settings(&self) -> Vec<SettingInfo> {
        defaults::keys()
            .filter_map(|key| {
                let (value, source) = self.resolve(key)?;
                Some(SettingInfo {
                    key: key.to_string(),
                    value,
                    source,
                    description: DEFAULT_SETTINGS[key].description.to_string(),
                })
            })
            .collect()
    }

    /// Report environment values that failed validation and odd combinations.
    pub fn check_status(&self) -> ConfigStatus {
        let mut status = ConfigStatus::default();

        for key in defaults::keys() {
            if let Some(value) = self.env.get(key) {
                if let Err(e) = validate_setting(key, value) {
                    status.invalid_settings.push(key.to_string());
                    status.warnings.push(format!("{key}={value:?} ignored: {e}"));
                }
            }
        }

        let grid = self.get_setting("GRID_SIZE").unwrap_or_default();
        let padding = self.get_setting("PADDING").unwrap_or_default();
        if let (Ok(grid), Ok(padding)) = (grid.parse::<u32>(), padding.parse::<u32>()) {
            if padding >= grid {
                status.warnings.push(format!(
                    "PADDING ({padding}) is not smaller than GRID_SIZE ({grid}); dots shrink to radius 1"
                ));
            }
        }

        status
    }

    fn resolve(&self, key: &str) -> Option<(String, SettingSource)> {
        let def = DEFAULT_SETTINGS.get(key)?;
        if let Some(v) = self.overrides.get(key) {
            return Some((v.clone(), SettingSource::Override));
        }
        if let Some(v) = self.env.get(key) {
            if validate_setting(key, v).is_ok() {
                return Some((v.clone(), SettingSource::Environment));
            }
        }
        Some((def.default.to_string(), SettingSource::Default))
    }
}
