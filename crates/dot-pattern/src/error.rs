/// Errors that can occur while sampling, rendering or encoding a dot pattern.
#[derive(Debug, thiserror::Error)]
pub enum DotPatternError {
    #[error("Invalid cell size: {0} (must be at least 1)")]
    InvalidCellSize(u32),

    #[error("Invalid {name} factor: {value} (must be finite and non-negative)")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("Invalid preview radius: {0} (must be at least 1)")]
    InvalidPreviewRadius(u32),

    #[error("Invalid preview size: {0} (must be at least 1)")]
    InvalidPreviewSize(u32),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result type alias for dot pattern operations.
pub type Result<T> = std::result::Result<T, DotPatternError>;
