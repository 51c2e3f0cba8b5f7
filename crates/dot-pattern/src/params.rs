//! Render parameters for both rendering modes.

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::{DotPatternError, Result};

/// Opaque black, the default background.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Accent color used for preview dots (`#3b82f6`).
pub const DEFAULT_ACCENT: Rgb<u8> = Rgb([0x3b, 0x82, 0xf6]);

/// Parameters of a full-resolution dot pattern render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    /// Side length of a sampled cell in pixels.
    pub cell_size: u32,
    /// Space between neighbouring dots in pixels.
    pub padding: u32,
    /// Contrast factor around mid-gray (`1.0` is neutral).
    pub contrast: f32,
    /// Saturation factor around luma gray (`1.0` is neutral).
    pub saturation: f32,
    #[serde(with = "rgb_hex")]
    pub background: Rgb<u8>,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            cell_size: 10,
            padding: 2,
            contrast: 1.0,
            saturation: 1.0,
            background: BLACK,
        }
    }
}

impl GridParameters {
    /// Check the parameters before a render.
    ///
    /// A padding at or above the cell size is not an error; the radius is
    /// clamped instead (see [`dot_radius`]).
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(DotPatternError::InvalidCellSize(self.cell_size));
        }
        validate_factor("contrast", self.contrast)?;
        validate_factor("saturation", self.saturation)?;
        Ok(())
    }

    /// Radius of every dot drawn with these parameters.
    pub fn dot_radius(&self) -> u32 {
        dot_radius(self.cell_size, self.padding)
    }
}

/// Parameters of the source-free preview swatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewParameters {
    /// Circle radius; the grid size control maps to this directly.
    pub radius: u32,
    /// Extra spacing between neighbouring circles.
    pub padding: u32,
    #[serde(with = "rgb_hex")]
    pub background: Rgb<u8>,
    #[serde(with = "rgb_hex")]
    pub accent: Rgb<u8>,
}

impl PreviewParameters {
    /// Preview of `grid` with the grid size used as circle radius.
    pub fn from_grid(grid: &GridParameters, accent: Rgb<u8>) -> Self {
        Self {
            radius: grid.cell_size,
            padding: grid.padding,
            background: grid.background,
            accent,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius == 0 {
            return Err(DotPatternError::InvalidPreviewRadius(self.radius));
        }
        Ok(())
    }

    /// Distance between neighbouring circle centers.
    pub fn step(&self) -> u32 {
        self.radius
            .saturating_mul(2)
            .saturating_add(self.padding)
    }
}

/// Dot radius for a cell size and padding: `(cell_size - padding) / 2`,
/// never below 1 so the output stays visible.
pub fn dot_radius(cell_size: u32, padding: u32) -> u32 {
    (cell_size.saturating_sub(padding) / 2).max(1)
}

fn validate_factor(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DotPatternError::InvalidFactor { name, value });
    }
    Ok(())
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or a basic color name.
pub fn parse_color(value: &str) -> Option<Rgb<u8>> {
    let v = value.trim().to_ascii_lowercase();
    match v.as_str() {
        "black" => return Some(BLACK),
        "white" => return Some(Rgb([255, 255, 255])),
        _ => {}
    }

    let hex = v.strip_prefix('#').unwrap_or(&v);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb([r, g, b]))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some(Rgb([digit(0)?, digit(1)?, digit(2)?]))
        }
        _ => None,
    }
}

/// Format a color as lowercase `#rrggbb`.
pub fn format_color(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

mod rgb_hex {
    use image::Rgb;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Rgb<u8>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgb<u8>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_color(&raw).ok_or_else(|| D::Error::custom(format!("invalid color: {raw}")))
    }
}
