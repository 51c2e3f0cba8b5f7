//! Source image loading.
//!
//! Decoding runs on the blocking pool. A failed decode is terminal for that
//! load attempt and leaves the previously loaded source in place.

use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use serde::Serialize;

use crate::app::SharedState;
use crate::error::StudioError;

/// A decoded source image, shared read-only between renders.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub image: Arc<DynamicImage>,
    /// RGBA8 view sampled by the renderer.
    pub pixels: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn from_image(name: impl Into<String>, image: DynamicImage) -> Self {
        let pixels = Arc::new(image.to_rgba8());
        Self {
            name: name.into(),
            image: Arc::new(image),
            pixels,
        }
    }

    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            name: self.name.clone(),
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }
}

/// Summary of a loaded source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Decode `bytes` and install the result as the current source.
pub async fn load_bytes(
    state: &SharedState,
    name: &str,
    bytes: Vec<u8>,
) -> Result<SourceInfo, StudioError> {
    let owned_name = name.to_string();
    let source = tokio::task::spawn_blocking(move || {
        dot_pattern::decode_image(&bytes).map(|img| SourceImage::from_image(owned_name, img))
    })
    .await?
    .inspect_err(|e| tracing::error!(name, error = %e, "Failed to decode source image"))?;

    let info = source.info();
    state.set_source(source).await;
    tracing::info!(name, width = info.width, height = info.height, "Source image loaded");
    Ok(info)
}

/// Read and decode an image file as the current source.
pub async fn load_file(state: &SharedState, path: &Path) -> Result<SourceInfo, StudioError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_bytes(state, &name, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]));
        dot_pattern::encode_png(&img).unwrap()
    }

    #[tokio::test]
    async fn test_load_bytes_installs_source() {
        let state = SharedState::new(AppConfig::default());
        let info = load_bytes(&state, "photo.png", png_bytes(30, 20)).await.unwrap();
        assert_eq!(
            info,
            SourceInfo {
                name: "photo.png".into(),
                width: 30,
                height: 20
            }
        );
        let source = state.source().await.unwrap();
        assert_eq!(source.pixels.dimensions(), (30, 20));
    }

    #[tokio::test]
    async fn test_failed_decode_keeps_previous_source() {
        let state = SharedState::new(AppConfig::default());
        load_bytes(&state, "first.png", png_bytes(8, 8)).await.unwrap();

        let result = load_bytes(&state, "broken.png", b"not an image".to_vec()).await;
        assert!(matches!(result, Err(StudioError::Render(_))));
        assert_eq!(state.source().await.unwrap().name, "first.png");
    }

    #[tokio::test]
    async fn test_loading_source_invalidates_in_flight_renders() {
        let state = SharedState::new(AppConfig::default());
        let generation = state.begin_render();
        load_bytes(&state, "photo.png", png_bytes(4, 4)).await.unwrap();
        assert!(!state.is_current(generation));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let state = SharedState::new(AppConfig::default());
        let result = load_file(&state, Path::new("/definitely/not/here.png")).await;
        assert!(matches!(result, Err(StudioError::Io(_))));
    }
}
