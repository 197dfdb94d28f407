//! Content-type-gated image transform stage.
//!
//! The transform is a resize plus re-encode. Requesting no dimensions is a
//! legal, explicit no-op: the payload still passes through decode and
//! re-encode (format normalization) rather than bypassing the stage. This
//! keeps "transform stage active but no-op" distinct from "transform stage
//! skipped entirely".

use bytes::Bytes;
use image::imageops::FilterType;
use image::ImageFormat;
use std::io::Cursor;

/// Target dimensions for the resize. `None` on an axis means that axis is
/// unconstrained; scaling preserves aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResizeDimensions {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    /// No resize requested on either axis.
    pub fn is_noop(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Resize/re-encode transform for raster image payloads.
pub struct ImageTransformer;

impl ImageTransformer {
    /// Whether the transform stage applies to this content type.
    pub fn should_transform(content_type: &str) -> bool {
        content_type.to_ascii_lowercase().starts_with("image/")
    }

    /// Decode, optionally resize, and re-encode.
    ///
    /// Returns the transformed bytes and their content type. Corrupt data
    /// and unsupported codecs fail the transform; callers must not commit
    /// any partial write in that case.
    pub fn transform(
        data: &[u8],
        dims: ResizeDimensions,
        content_type: &str,
    ) -> Result<(Bytes, String), TransformError> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| TransformError::Decode(e.to_string()))?;

        let img = match (dims.width, dims.height) {
            (None, None) => img,
            (Some(width), Some(height)) => img.resize(width, height, FilterType::Lanczos3),
            (Some(width), None) => img.resize(width, u32::MAX, FilterType::Lanczos3),
            (None, Some(height)) => img.resize(u32::MAX, height, FilterType::Lanczos3),
        };

        let format = Self::detect_format(content_type);

        tracing::debug!(
            width = img.width(),
            height = img.height(),
            format = ?format,
            noop_resize = dims.is_noop(),
            "Re-encoding image"
        );

        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| TransformError::Encode(e.to_string()))?;

        Ok((Bytes::from(buffer), format.to_mime_type().to_string()))
    }

    /// Detect output format from the declared content type.
    fn detect_format(content_type: &str) -> ImageFormat {
        match content_type.to_ascii_lowercase().as_str() {
            "image/png" => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format)
            .expect("encode test image");
        buffer
    }

    #[test]
    fn test_should_transform_images() {
        assert!(ImageTransformer::should_transform("image/png"));
        assert!(ImageTransformer::should_transform("image/jpeg"));
        assert!(ImageTransformer::should_transform("IMAGE/PNG"));
    }

    #[test]
    fn test_should_not_transform_non_images() {
        assert!(!ImageTransformer::should_transform("text/plain"));
        assert!(!ImageTransformer::should_transform("application/pdf"));
        assert!(!ImageTransformer::should_transform(""));
    }

    #[test]
    fn test_noop_transform_still_reencodes() {
        let data = encoded_image(8, 6, ImageFormat::Png);
        let (out, content_type) =
            ImageTransformer::transform(&data, ResizeDimensions::default(), "image/png")
                .expect("transform");
        assert_eq!(content_type, "image/png");
        let decoded = image::load_from_memory(&out).expect("decode output");
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn test_resize_both_axes_fits_within_box() {
        let data = encoded_image(100, 50, ImageFormat::Png);
        let dims = ResizeDimensions::new(Some(50), Some(50));
        let (out, _) = ImageTransformer::transform(&data, dims, "image/png").expect("transform");
        let decoded = image::load_from_memory(&out).expect("decode output");
        assert_eq!((decoded.width(), decoded.height()), (50, 25));
    }

    #[test]
    fn test_resize_width_only_preserves_aspect() {
        let data = encoded_image(100, 50, ImageFormat::Png);
        let dims = ResizeDimensions::new(Some(20), None);
        let (out, _) = ImageTransformer::transform(&data, dims, "image/png").expect("transform");
        let decoded = image::load_from_memory(&out).expect("decode output");
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_resize_height_only_preserves_aspect() {
        let data = encoded_image(100, 50, ImageFormat::Png);
        let dims = ResizeDimensions::new(None, Some(25));
        let (out, _) = ImageTransformer::transform(&data, dims, "image/png").expect("transform");
        let decoded = image::load_from_memory(&out).expect("decode output");
        assert_eq!((decoded.width(), decoded.height()), (50, 25));
    }

    #[test]
    fn test_jpeg_output_content_type() {
        let data = encoded_image(10, 10, ImageFormat::Jpeg);
        let (_, content_type) =
            ImageTransformer::transform(&data, ResizeDimensions::default(), "image/jpeg")
                .expect("transform");
        assert_eq!(content_type, "image/jpeg");
    }

    #[test]
    fn test_corrupt_data_fails_decode() {
        let err = ImageTransformer::transform(
            b"definitely not an image",
            ResizeDimensions::default(),
            "image/png",
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
    }

    #[test]
    fn test_truncated_image_fails_decode() {
        let mut data = encoded_image(32, 32, ImageFormat::Png);
        data.truncate(data.len() / 2);
        let result =
            ImageTransformer::transform(&data, ResizeDimensions::default(), "image/png");
        assert!(result.is_err());
    }
}
