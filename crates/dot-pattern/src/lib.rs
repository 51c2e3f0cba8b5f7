//! Dot pattern rendering.
//!
//! Partitions a raster image into square cells, averages and enhances each
//! cell's color, and draws it back as a filled circle over a solid
//! background. Also renders a source-free preview swatch of the grid
//! parameters and a display-sized copy of the source image.

pub mod codec;
pub mod enhance;
pub mod error;
pub mod grid;
pub mod params;
pub mod preview;
pub mod render;
pub mod resize;

// Re-exports for convenience
pub use codec::{decode_image, encode_png, png_data_url};
pub use enhance::enhance_color;
pub use error::{DotPatternError, Result};
pub use params::{GridParameters, PreviewParameters, dot_radius};
pub use preview::{preview_grid_count, render_parameter_preview};
pub use render::{Dot, plan_dots, render_dot_pattern, render_dynamic_image};
pub use resize::resize_for_display;

/// Side length of the parameter preview swatch in pixels.
pub const DEFAULT_PREVIEW_SIZE: u32 = 120;

/// Preferred width of the source display preview in pixels.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1000;
