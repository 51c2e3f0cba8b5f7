//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("GRID_SIZE", "10", "Cell size in pixels (also the preview circle radius)"),
    ("PADDING", "2", "Space between dots in pixels"),
    ("BACKGROUND_COLOR", "#000000", "Background fill behind the dots"),
    ("CONTRAST", "1.0", "Contrast factor around mid-gray (1.0 = neutral)"),
    ("SATURATION", "1.0", "Saturation factor around luma gray (1.0 = neutral)"),
    ("PREVIEW_SIZE", "120", "Side length of the parameter preview swatch"),
    ("ACCENT_COLOR", "#3b82f6", "Dot color of the parameter preview swatch"),
    ("DISPLAY_WIDTH", "1000", "Preferred width of the source display preview"),
    ("EXPORT_FILE_NAME", "processed-image.png", "File name offered for the exported render"),
];

/// Prefix of environment variables that set a key (`DOTIFY_GRID_SIZE`, ...).
pub const ENV_PREFIX: &str = "DOTIFY_";

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Setting keys in definition order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|(key, _, _)| *key)
}

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Environment variable name for a setting key.
pub fn env_key(key: &str) -> String {
    format!("{ENV_PREFIX}{key}")
}
