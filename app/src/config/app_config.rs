//! Runtime application configuration resolved from the settings manager.

use dot_pattern::params::{BLACK, DEFAULT_ACCENT, parse_color};
use dot_pattern::{DEFAULT_DISPLAY_WIDTH, DEFAULT_PREVIEW_SIZE, GridParameters, PreviewParameters};
use image::Rgb;
use serde::Serialize;

use super::manager::SettingsManager;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub grid_size: u32,
    pub padding: u32,
    pub contrast: f32,
    pub saturation: f32,
    #[serde(serialize_with = "serialize_color")]
    pub background: Rgb<u8>,
    pub preview_size: u32,
    #[serde(serialize_with = "serialize_color")]
    pub accent: Rgb<u8>,
    pub display_width: u32,
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            padding: 2,
            contrast: 1.0,
            saturation: 1.0,
            background: BLACK,
            preview_size: DEFAULT_PREVIEW_SIZE,
            accent: DEFAULT_ACCENT,
            display_width: DEFAULT_DISPLAY_WIDTH,
            export_file_name: "processed-image.png".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager (overrides > env > defaults).
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };
        let d = Self::default();

        Ok(Self {
            grid_size: parse_u32(&g("GRID_SIZE"), d.grid_size),
            padding: parse_u32(&g("PADDING"), d.padding),
            contrast: parse_f32(&g("CONTRAST"), d.contrast),
            saturation: parse_f32(&g("SATURATION"), d.saturation),
            background: parse_color(&g("BACKGROUND_COLOR")).unwrap_or(d.background),
            preview_size: parse_u32(&g("PREVIEW_SIZE"), d.preview_size),
            accent: parse_color(&g("ACCENT_COLOR")).unwrap_or(d.accent),
            display_width: parse_u32(&g("DISPLAY_WIDTH"), d.display_width),
            export_file_name: {
                let name = g("EXPORT_FILE_NAME");
                if name.is_empty() { d.export_file_name } else { name }
            },
        })
    }

    /// Parameters for a full-resolution render.
    pub fn grid_parameters(&self) -> GridParameters {
        GridParameters {
            cell_size: self.grid_size,
            padding: self.padding,
            contrast: self.contrast,
            saturation: self.saturation,
            background: self.background,
        }
    }

    /// Parameters for the preview swatch.
    pub fn preview_parameters(&self) -> PreviewParameters {
        PreviewParameters::from_grid(&self.grid_parameters(), self.accent)
    }
}

fn serialize_color<S: serde::Serializer>(color: &Rgb<u8>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dot_pattern::params::format_color(*color))
}

fn parse_f32(s: &str, default: f32) -> f32 {
    if s.is_empty() {
        return default;
    }
    s.trim().parse().unwrap_or(default)
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.trim().parse().unwrap_or(default)
}
