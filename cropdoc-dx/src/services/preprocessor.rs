//! Upload validation and decoding into a fixed-size pixel grid

use crate::error::{DiagnosisError, InputError};
use crate::models::PixelGrid;
use image::imageops::{self, FilterType};
use std::path::Path;
use tracing::debug;

/// Side length of the analysis grid
pub const TARGET_SIZE: u32 = 224;

/// Largest accepted upload (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Keep single-channel sources as luma grids
    pub preserve_grayscale: bool,
}

/// Reject uploads that can never be decoded, before touching the bytes
///
/// Checks content type, then emptiness, then size.
pub fn validate(bytes: &[u8], content_type: &str) -> Result<(), InputError> {
    if !content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
    {
        return Err(InputError::NotAnImage(content_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(InputError::TooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Validate, decode and resize to a 224×224 grid
pub fn preprocess(
    bytes: &[u8],
    content_type: &str,
    options: PreprocessOptions,
) -> Result<PixelGrid, DiagnosisError> {
    validate(bytes, content_type)?;

    let img = image::load_from_memory(bytes).map_err(|e| DiagnosisError::Decode(e.to_string()))?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded upload"
    );

    let side = TARGET_SIZE as usize;
    let grid = if options.preserve_grayscale && !img.color().has_color() {
        let resized = imageops::resize(&img.to_luma8(), TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3);
        let samples = resized.pixels().map(|p| f32::from(p.0[0])).collect();
        PixelGrid::from_luma(side, side, samples)
    } else {
        let resized = imageops::resize(&img.to_rgb8(), TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3);
        let pixels = resized
            .pixels()
            .map(|p| p.0.map(f32::from))
            .collect();
        PixelGrid::from_rgb(side, side, pixels)
    };

    grid.ok_or_else(|| DiagnosisError::Decode("resized image has unexpected dimensions".into()))
}

/// MIME type implied by a file extension, for callers without a declared type
pub fn guess_content_type(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PixelData;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(rgb));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_rejects_non_image_type_first() {
        let err = validate(&[], "application/pdf").unwrap_err();
        assert!(matches!(err, InputError::NotAnImage(_)));
    }

    #[test]
    fn test_content_type_case_insensitive() {
        assert!(validate(&[1], "IMAGE/PNG").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate(&[], "image/png").unwrap_err(), InputError::Empty);
    }

    #[test]
    fn test_size_limit_boundary() {
        let at_limit = vec![0u8; MAX_UPLOAD_BYTES];
        assert!(validate(&at_limit, "image/jpeg").is_ok());

        let over = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert_eq!(
            validate(&over, "image/jpeg").unwrap_err(),
            InputError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES
            }
        );
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = preprocess(b"definitely not a png", "image/png", PreprocessOptions::default())
            .unwrap_err();
        assert!(matches!(err, DiagnosisError::Decode(_)));
    }

    #[test]
    fn test_resizes_to_target() {
        let grid = preprocess(&png(50, 30, [10, 180, 20]), "image/png", PreprocessOptions::default())
            .unwrap();
        assert_eq!(grid.width(), 224);
        assert_eq!(grid.height(), 224);
        match grid.data() {
            PixelData::Rgb(px) => assert!(px.iter().all(|p| (p[1] - 180.0).abs() <= 1.0)),
            PixelData::Luma(_) => panic!("expected rgb"),
        }
    }

    #[test]
    fn test_grayscale_expanded_unless_preserved() {
        let img = image::GrayImage::from_pixel(32, 32, image::Luma([90]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        let bytes = buf.into_inner();

        let expanded = preprocess(&bytes, "image/png", PreprocessOptions::default()).unwrap();
        assert!(!expanded.is_grayscale());

        let kept = preprocess(
            &bytes,
            "image/png",
            PreprocessOptions {
                preserve_grayscale: true,
            },
        )
        .unwrap();
        assert!(kept.is_grayscale());
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("leaf.PNG")), "image/png");
        assert_eq!(guess_content_type(Path::new("tomato_leaf.jpg")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("notes.txt")), "application/octet-stream");
    }
}
