//! Grid partitioning and per-cell color averaging.
//!
//! Cells are square regions of side `cell_size` aligned to a grid starting at
//! the top-left corner. Cells on the right and bottom edges are clipped to the
//! image bounds; out-of-bounds samples are never read.

use image::RgbaImage;

/// A grid cell clipped to the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Grid origin (top-left of the unclipped cell).
    pub x: u32,
    pub y: u32,
    /// In-bounds extent; smaller than the cell size on the far edges.
    pub width: u32,
    pub height: u32,
}

impl Cell {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Iterate the cells covering a `width` x `height` image in row-major order.
///
/// `cell_size` must be at least 1. Only cells with at least one in-bounds
/// pixel are produced.
pub fn cells(width: u32, height: u32, cell_size: u32) -> impl Iterator<Item = Cell> {
    debug_assert!(cell_size > 0);
    let step = cell_size.max(1) as usize;
    (0..height).step_by(step).flat_map(move |y| {
        (0..width).step_by(step).map(move |x| Cell {
            x,
            y,
            width: cell_size.min(width - x),
            height: cell_size.min(height - y),
        })
    })
}

/// Number of cells per axis: `ceil(len / cell_size)`.
pub fn cells_per_axis(len: u32, cell_size: u32) -> u32 {
    len.div_ceil(cell_size.max(1))
}

/// Mean R, G, B of the cell's pixels. Alpha is ignored.
///
/// Returns `None` for a cell without pixels.
pub fn average_color(img: &RgbaImage, cell: &Cell) -> Option<[f32; 3]> {
    let count = cell.pixel_count();
    if count == 0 {
        return None;
    }

    let mut sums = [0u64; 3];
    for py in cell.y..cell.y + cell.height {
        for px in cell.x..cell.x + cell.width {
            let p = img.get_pixel(px, py).0;
            sums[0] += u64::from(p[0]);
            sums[1] += u64::from(p[1]);
            sums[2] += u64::from(p[2]);
        }
    }

    let n = count as f64;
    Some(sums.map(|s| (s as f64 / n) as f32))
}
