//! Parameter preview swatch.
//!
//! Shows how dot size, spacing and background look before a full render.
//! No source image is involved: the grid size is used directly as the circle
//! radius and every circle gets the same accent color.

use tracing::debug;

use crate::error::{DotPatternError, Result};
use crate::params::PreviewParameters;
use crate::render::{Dot, draw_dot, filled_canvas, to_coord};

/// Number of whole circles that fit along one axis of a `size` swatch.
pub fn preview_grid_count(size: u32, params: &PreviewParameters) -> u32 {
    match params.step() {
        0 => 0,
        step => size / step,
    }
}

/// Render a `size` x `size` preview swatch.
pub fn render_parameter_preview(size: u32, params: &PreviewParameters) -> Result<image::RgbaImage> {
    if size == 0 {
        return Err(DotPatternError::InvalidPreviewSize(size));
    }
    params.validate()?;

    let count = preview_grid_count(size, params);
    let step = to_coord(params.step());
    let radius = to_coord(params.radius);
    debug!(size, radius, step, count, "Rendering parameter preview");

    let mut canvas = filled_canvas(size, size, params.background);
    for row in 0..to_coord(count) {
        for col in 0..to_coord(count) {
            let dot = Dot {
                center: (
                    radius.saturating_add(col.saturating_mul(step)),
                    radius.saturating_add(row.saturating_mul(step)),
                ),
                radius,
                color: params.accent,
            };
            draw_dot(&mut canvas, &dot);
        }
    }

    Ok(canvas)
}
