//! Full-resolution dot pattern rendering.
//!
//! Every grid cell of the source becomes one filled circle in the cell's
//! enhanced average color, drawn over a solid background. The output always
//! has the exact dimensions of the source.

use image::{DynamicImage, Rgb, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::enhance::enhance_color;
use crate::error::{DotPatternError, Result};
use crate::grid::{self, average_color};
use crate::params::GridParameters;

/// A single planned circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub center: (i32, i32),
    pub radius: i32,
    pub color: Rgb<u8>,
}

/// Render `source` as a dot pattern.
pub fn render_dot_pattern(source: &RgbaImage, params: &GridParameters) -> Result<RgbaImage> {
    let dots = plan_dots(source, params)?;
    let (width, height) = source.dimensions();

    let mut output = filled_canvas(width, height, params.background);
    for dot in &dots {
        draw_dot(&mut output, dot);
    }

    debug!(width, height, dots = dots.len(), "Dot pattern rendered");
    Ok(output)
}

/// Render any decoded image as a dot pattern.
pub fn render_dynamic_image(source: &DynamicImage, params: &GridParameters) -> Result<RgbaImage> {
    render_dot_pattern(&source.to_rgba8(), params)
}

/// Compute the dots for `source` in draw order (row-major) without drawing.
pub fn plan_dots(source: &RgbaImage, params: &GridParameters) -> Result<Vec<Dot>> {
    params.validate()?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(DotPatternError::EmptyImage { width, height });
    }

    let cell_size = params.cell_size;
    let radius = to_coord(params.dot_radius());
    let half = to_coord(cell_size / 2);

    debug!(
        width,
        height,
        cell_size,
        padding = params.padding,
        radius,
        "Sampling grid cells"
    );

    let capacity = grid::cells_per_axis(width, cell_size) as usize
        * grid::cells_per_axis(height, cell_size) as usize;
    let mut dots = Vec::with_capacity(capacity);

    for cell in grid::cells(width, height, cell_size) {
        let Some([r, g, b]) = average_color(source, &cell) else {
            continue;
        };
        dots.push(Dot {
            center: (
                to_coord(cell.x).saturating_add(half),
                to_coord(cell.y).saturating_add(half),
            ),
            radius,
            color: enhance_color(r, g, b, params.contrast, params.saturation),
        });
    }

    Ok(dots)
}

/// An opaque canvas filled with `background`.
pub(crate) fn filled_canvas(width: u32, height: u32, background: Rgb<u8>) -> RgbaImage {
    let [r, g, b] = background.0;
    RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]))
}

/// Pixel coordinate for a `u32` quantity, saturating at `i32::MAX`.
pub(crate) fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Draw a solid, opaque circle. Parts outside the canvas are clipped.
///
/// Circles that miss the canvas are skipped. Circles with a radius larger
/// than the canvas are filled per pixel, since the midpoint rasterizer walks
/// the whole radius and overflows near `i32::MAX`.
pub(crate) fn draw_dot(canvas: &mut RgbaImage, dot: &Dot) {
    let (width, height) = canvas.dimensions();
    let (cx, cy) = (i64::from(dot.center.0), i64::from(dot.center.1));
    let radius = i64::from(dot.radius);
    if radius < 0
        || cx + radius < 0
        || cy + radius < 0
        || cx - radius >= i64::from(width)
        || cy - radius >= i64::from(height)
    {
        return;
    }

    let [r, g, b] = dot.color.0;
    let color = Rgba([r, g, b, 255]);
    if radius <= i64::from(width.max(height)) {
        draw_filled_circle_mut(canvas, dot.center, dot.radius, color);
    } else {
        fill_large_disc(canvas, (cx, cy), radius, color);
    }
}

fn fill_large_disc(canvas: &mut RgbaImage, center: (i64, i64), radius: i64, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let limit = i128::from(radius) * i128::from(radius);
    for y in 0..height {
        let dy = i128::from(i64::from(y) - center.1);
        for x in 0..width {
            let dx = i128::from(i64::from(x) - center.0);
            if dx * dx + dy * dy <= limit {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}
