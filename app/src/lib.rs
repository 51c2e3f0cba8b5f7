pub mod app;
pub mod config;
pub mod error;
pub mod services;

use config::{AppConfig, SettingsManager};

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Capture settings from the environment (after loading `.env`).
pub fn init_settings() -> SettingsManager {
    load_dotenv();
    SettingsManager::from_env()
}

/// Resolve the runtime config and log any settings that were ignored.
pub fn init_config(sm: &SettingsManager) -> Result<AppConfig, anyhow::Error> {
    let status = sm.check_status();
    for warning in &status.warnings {
        tracing::warn!("{warning}");
    }

    let config = AppConfig::load(sm)?;
    tracing::info!(
        grid_size = config.grid_size,
        padding = config.padding,
        "Settings loaded"
    );
    Ok(config)
}
