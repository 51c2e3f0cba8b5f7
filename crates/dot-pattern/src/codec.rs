//! Decoding of source images and PNG encoding of rendered output.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{DotPatternError, Result};

/// Decode an encoded image (PNG, JPEG, GIF, WebP, BMP) from memory.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes).map_err(DotPatternError::Decode)?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DotPatternError::EmptyImage { width, height });
    }
    debug!(width, height, bytes = bytes.len(), "Decoded source image");
    Ok(img)
}

/// Encode a rendered buffer as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .map_err(DotPatternError::Encode)?;
    let png = cursor.into_inner();
    debug!(width = img.width(), height = img.height(), bytes = png.len(), "Encoded PNG");
    Ok(png)
}

/// `data:` URL for PNG bytes, suitable for inline display.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encoded_png_decodes_to_same_pixels() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        img.put_pixel(2, 1, Rgba([250, 128, 0, 255]));

        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = decode_image(&png).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DotPatternError::Decode(_))));
    }

    #[test]
    fn test_png_data_url_prefix() {
        let png = encode_png(&RgbaImage::new(1, 1)).unwrap();
        let url = png_data_url(&png);
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
