//! Contrast and saturation enhancement of averaged cell colors.

use image::Rgb;

/// Mid-gray pivot for the contrast curve.
const PIVOT: f32 = 127.5;

/// Perceptual luma weights (R, G, B).
const LUMA: [f32; 3] = [0.30, 0.59, 0.11];

/// Enhance an RGB triple by `contrast` and `saturation`.
///
/// Contrast scales each channel around mid-gray and clamps to `[0, 255]`.
/// Saturation then scales each channel's deviation from the luma gray of the
/// contrast-adjusted triple: `0.0` collapses to gray, `1.0` leaves the color
/// unchanged and larger values push channels away from gray.
///
/// Channels are floored and clamped to `[0, 255]` on both ends. Inputs must be
/// finite; callers validate factors before reaching here.
pub fn enhance_color(r: f32, g: f32, b: f32, contrast: f32, saturation: f32) -> Rgb<u8> {
    let c = [r, g, b].map(|v| apply_contrast(v, contrast));
    let gray = LUMA[0] * c[0] + LUMA[1] * c[1] + LUMA[2] * c[2];
    Rgb(c.map(|v| to_channel(v + (saturation - 1.0) * (v - gray))))
}

/// `((v/255 - 0.5) * contrast + 0.5) * 255`, rearranged around the pivot so
/// that `contrast == 1.0` is exact.
fn apply_contrast(value: f32, contrast: f32) -> f32 {
    ((value - PIVOT) * contrast + PIVOT).clamp(0.0, 255.0)
}

fn to_channel(value: f32) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}
