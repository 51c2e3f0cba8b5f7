//! Render orchestration.
//!
//! Full-resolution renders run on the blocking pool and are delivered as
//! futures. Concurrent requests follow a cancel-and-replace policy: each
//! request claims a new generation, and a render that finishes after a newer
//! one was requested is discarded instead of published.

use dot_pattern::{GridParameters, render_parameter_preview, resize_for_display};
use image::{DynamicImage, RgbaImage};

use crate::app::SharedState;
use crate::error::StudioError;
use crate::services::export::ExportedImage;

/// Encoded output of one finished render.
pub(crate) struct RenderedPng {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Render the current source with `params`, encode it and publish the export.
pub async fn process_image(
    state: &SharedState,
    params: GridParameters,
) -> Result<ExportedImage, StudioError> {
    params.validate()?;

    // Claim before reading the source; a later set_source makes this stale.
    let generation = state.begin_render();
    let Some(source) = state.source().await else {
        tracing::warn!("Process requested without a source image");
        return Err(StudioError::NoSourceImage);
    };
    let file_name = state.config().await.export_file_name.clone();
    tracing::info!(
        generation,
        source = %source.name,
        cell_size = params.cell_size,
        padding = params.padding,
        "Render started"
    );

    let pixels = source.pixels.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        let output = dot_pattern::render_dot_pattern(&pixels, &params)?;
        let png = dot_pattern::encode_png(&output)?;
        Ok::<_, dot_pattern::DotPatternError>(RenderedPng {
            png,
            width: output.width(),
            height: output.height(),
        })
    })
    .await??;

    publish_if_current(state, generation, &file_name, rendered).await
}

/// Publish a finished render unless a newer generation was claimed meanwhile.
pub(crate) async fn publish_if_current(
    state: &SharedState,
    generation: u64,
    file_name: &str,
    rendered: RenderedPng,
) -> Result<ExportedImage, StudioError> {
    if !state.is_current(generation) {
        let latest = state.latest_generation();
        tracing::info!(generation, latest, "Render superseded, discarding result");
        return Err(StudioError::Superseded { generation, latest });
    }

    state
        .exports()
        .publish(
            generation,
            file_name,
            rendered.png,
            rendered.width,
            rendered.height,
        )
        .await
}

/// Render the current source with the configured parameters.
pub async fn process_with_config(state: &SharedState) -> Result<ExportedImage, StudioError> {
    let params = state.config().await.grid_parameters();
    process_image(state, params).await
}

/// Render the parameter preview swatch for the current configuration.
pub async fn render_preview(state: &SharedState) -> Result<RgbaImage, StudioError> {
    let (size, params) = {
        let config = state.config().await;
        (config.preview_size, config.preview_parameters())
    };
    Ok(render_parameter_preview(size, &params)?)
}

/// Display-sized copy of the current source, bounded by `available_width`.
pub async fn display_preview(
    state: &SharedState,
    available_width: u32,
) -> Result<DynamicImage, StudioError> {
    let Some(source) = state.source().await else {
        tracing::warn!("Display preview requested without a source image");
        return Err(StudioError::NoSourceImage);
    };
    let preferred = state.config().await.display_width;

    let image = source.image.clone();
    Ok(
        tokio::task::spawn_blocking(move || resize_for_display(&image, preferred, available_width))
            .await?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::source::SourceImage;
    use image::{GenericImageView, Rgba};

    const ORANGE: Rgba<u8> = Rgba([200, 100, 50, 255]);

    async fn state_with_source(width: u32, height: u32) -> SharedState {
        let state = SharedState::new(AppConfig::default());
        let img = RgbaImage::from_pixel(width, height, ORANGE);
        state
            .set_source(SourceImage::from_image("solid.png", DynamicImage::ImageRgba8(img)))
            .await;
        state
    }

    #[tokio::test]
    async fn test_process_without_source_warns_and_fails() {
        let state = SharedState::new(AppConfig::default());
        let result = process_with_config(&state).await;
        assert!(matches!(result, Err(StudioError::NoSourceImage)));
        assert!(state.exports().latest().await.is_none());
    }

    #[tokio::test]
    async fn test_process_publishes_full_resolution_png() {
        let state = state_with_source(100, 60).await;
        let export = process_with_config(&state).await.unwrap();

        assert_eq!((export.width, export.height), (100, 60));
        assert_eq!(export.file_name, "processed-image.png");

        let decoded = dot_pattern::decode_image(&export.png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 60));
        assert_eq!(*decoded.get_pixel(5, 5), ORANGE);
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[tokio::test]
    async fn test_second_render_revokes_first_export() {
        let state = state_with_source(40, 40).await;
        let first = process_with_config(&state).await.unwrap();
        let second = process_image(
            &state,
            GridParameters {
                cell_size: 20,
                ..GridParameters::default()
            },
        )
        .await
        .unwrap();

        assert!(second.generation > first.generation);
        assert!(state.exports().get(&first.id).await.is_none());
        assert_eq!(state.exports().latest().await.unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_identical_renders_are_byte_identical() {
        let state = state_with_source(33, 21).await;
        let a = process_with_config(&state).await.unwrap();
        let b = process_with_config(&state).await.unwrap();
        assert_eq!(a.png, b.png);
    }

    #[tokio::test]
    async fn test_invalid_parameters_do_not_claim_a_generation() {
        let state = state_with_source(10, 10).await;
        let before = state.latest_generation();
        let result = process_image(
            &state,
            GridParameters {
                contrast: f32::NAN,
                ..GridParameters::default()
            },
        )
        .await;
        assert!(matches!(result, Err(StudioError::Render(_))));
        assert_eq!(state.latest_generation(), before);
    }

    fn rendered(width: u32, height: u32) -> RenderedPng {
        let img = RgbaImage::from_pixel(width, height, ORANGE);
        RenderedPng {
            png: dot_pattern::encode_png(&img).unwrap(),
            width,
            height,
        }
    }

    #[tokio::test]
    async fn test_stale_render_is_discarded() {
        let state = state_with_source(10, 10).await;
        let stale = state.begin_render();
        let newer = state.begin_render();

        let result = publish_if_current(&state, stale, "out.png", rendered(10, 10)).await;
        assert!(matches!(
            result,
            Err(StudioError::Superseded { generation, latest }) if generation == stale && latest == newer
        ));
        assert!(state.exports().latest().await.is_none());
    }

    #[tokio::test]
    async fn test_new_source_discards_render_in_flight() {
        let state = state_with_source(10, 10).await;
        let generation = state.begin_render();
        state
            .set_source(SourceImage::from_image(
                "other.png",
                DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, ORANGE)),
            ))
            .await;

        let result = publish_if_current(&state, generation, "out.png", rendered(10, 10)).await;
        assert!(matches!(result, Err(StudioError::Superseded { .. })));
        assert!(state.exports().latest().await.is_none());
    }

    #[tokio::test]
    async fn test_current_render_is_published() {
        let state = state_with_source(10, 10).await;
        let generation = state.begin_render();
        let export = publish_if_current(&state, generation, "out.png", rendered(10, 10))
            .await
            .unwrap();
        assert_eq!(export.generation, generation);
        assert_eq!(state.exports().latest().await.unwrap().id, export.id);
    }

    #[tokio::test]
    async fn test_render_preview_uses_config() {
        let state = SharedState::new(AppConfig::default());
        let preview = render_preview(&state).await.unwrap();
        assert_eq!(preview.dimensions(), (120, 120));
        assert_eq!(*preview.get_pixel(10, 10), Rgba([0x3b, 0x82, 0xf6, 255]));
    }

    #[tokio::test]
    async fn test_display_preview_is_bounded_and_keeps_aspect() {
        let state = state_with_source(400, 200).await;
        let shown = display_preview(&state, 300).await.unwrap();
        assert_eq!(shown.dimensions(), (300, 150));

        let wide = display_preview(&state, 4000).await.unwrap();
        assert_eq!(wide.dimensions(), (1000, 500));
    }

    #[tokio::test]
    async fn test_display_preview_without_source() {
        let state = SharedState::new(AppConfig::default());
        assert!(matches!(
            display_preview(&state, 300).await,
            Err(StudioError::NoSourceImage)
        ));
    }
}
