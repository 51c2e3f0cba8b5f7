//! Display-sized copy of the source image.
//!
//! This is the plain "original image" shown next to the controls, not the
//! dot pattern. The copy is never wider than the preferred display width or
//! the space actually available, whichever is smaller.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Rescale `source` for display.
///
/// The target width is `min(preferred, available)`, at least 1. Height keeps
/// the aspect ratio, `round(target * h / w)`, at least 1. Sources already at
/// the target width (or empty) are returned as they are.
pub fn resize_for_display(source: &DynamicImage, preferred: u32, available: u32) -> DynamicImage {
    let target = preferred.min(available).max(1);
    let (w, h) = (source.width(), source.height());
    if w == 0 || h == 0 || w == target {
        return source.clone();
    }

    let scaled = u64::from(target) * u64::from(h);
    let height = ((scaled + u64::from(w) / 2) / u64::from(w)).clamp(1, u64::from(u32::MAX)) as u32;
    debug!(from_width = w, from_height = h, width = target, height, "Scaling source for display");

    source.resize_exact(target, height, FilterType::Lanczos3)
}
