//! Synthetic leaf images
//!
//! Images are built as `RgbImage`s so the same picture can be fed to the
//! engine as a grid or encoded as PNG/JPEG for upload tests.

use cropdoc_dx::models::PixelGrid;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub const GREEN: [u8; 3] = [40, 200, 40];
/// Dark green below the bright-green pixel cutoff
pub const SHADED_GREEN: [u8; 3] = [30, 75, 30];
/// Brown lesion color
pub const TAN: [u8; 3] = [150, 100, 50];
pub const YELLOW: [u8; 3] = [200, 190, 60];
pub const DARK: [u8; 3] = [30, 30, 30];
pub const MID_GRAY: [u8; 3] = [128, 128, 128];

/// Horizontal band of `rows` rows in one color
#[derive(Debug, Clone, Copy)]
pub struct LeafBand {
    pub rows: u32,
    pub color: [u8; 3],
}

/// 224 rows: brown ≈ 0.30, yellow ≈ 0.05, dark ≈ 0.05, rest bright green
pub const BLIGHTED_BANDS: [LeafBand; 4] = [
    LeafBand { rows: 67, color: TAN },
    LeafBand { rows: 11, color: YELLOW },
    LeafBand { rows: 11, color: DARK },
    LeafBand { rows: 135, color: GREEN },
];

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Stack bands top to bottom; width is fixed, height is the band total
pub fn striped(width: u32, bands: &[LeafBand]) -> RgbImage {
    let height: u32 = bands.iter().map(|b| b.rows).sum();
    let mut img = RgbImage::new(width, height);
    let mut y = 0;
    for band in bands {
        for row in y..y + band.rows {
            for x in 0..width {
                img.put_pixel(x, row, Rgb(band.color));
            }
        }
        y += band.rows;
    }
    img
}

/// Deterministic speckled leaf: green base with pseudo-random lesions
pub fn noisy_leaf(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };

    RgbImage::from_fn(width, height, |_, _| {
        let base = match next() % 10 {
            0..=5 => GREEN,
            6 => TAN,
            7 => YELLOW,
            8 => DARK,
            _ => [230, 230, 230],
        };
        let jitter = (next() % 21) as i32 - 10;
        Rgb(base.map(|c| (i32::from(c) + jitter).clamp(0, 255) as u8))
    })
}

/// Convert to a grid without resampling
pub fn to_grid(img: &RgbImage) -> PixelGrid {
    let pixels = img.pixels().map(|p| p.0.map(f32::from)).collect();
    PixelGrid::from_rgb(img.width() as usize, img.height() as usize, pixels)
        .expect("dimensions match pixel count")
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("png encode");
    buf.into_inner()
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .expect("jpeg encode");
    buf
}
