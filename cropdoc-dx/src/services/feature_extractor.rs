//! Color and texture feature extraction
//!
//! Pure function of the pixel grid. Accumulation runs in a fixed row-major
//! order so identical grids always give bit-identical vectors.

use crate::models::{FeatureVector, PixelData, PixelGrid};

/// Side of the square blocks used for local texture
pub const TEXTURE_BLOCK: usize = 8;

/// Edge density at which the health score's edge term bottoms out
const EDGE_SATURATION: f64 = 30.0;

// Fixed features reported for grayscale grids, where color ratios are meaningless
const GRAYSCALE_GREEN_HEALTH: f64 = 0.5;
const GRAYSCALE_BROWN_RATIO: f64 = 0.2;
const GRAYSCALE_YELLOW_RATIO: f64 = 0.15;
const GRAYSCALE_DARK_RATIO: f64 = 0.1;

/// Compute the feature vector for a grid
pub fn extract_features(grid: &PixelGrid) -> FeatureVector {
    match grid.data() {
        PixelData::Rgb(pixels) => extract_rgb(grid.width(), grid.height(), pixels),
        PixelData::Luma(samples) => extract_luma(samples),
    }
}

fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

fn is_green(r: f64, g: f64, b: f64) -> bool {
    g > r && g > b && g > 80.0
}

fn is_brown(r: f64, g: f64, b: f64) -> bool {
    r > 100.0 && g > 50.0 && g < 160.0 && b < 100.0 && r > g && g > b
}

fn is_yellow(r: f64, g: f64, b: f64) -> bool {
    r > 140.0 && g > 140.0 && b < 110.0 && (r - g).abs() < 50.0
}

fn is_dark(r: f64, g: f64, b: f64) -> bool {
    r < 60.0 && g < 60.0 && b < 60.0
}

fn is_white(r: f64, g: f64, b: f64) -> bool {
    r > 180.0 && g > 180.0 && b > 180.0
}

fn is_gray(r: f64, g: f64, b: f64) -> bool {
    (r - g).abs() < 20.0 && (g - b).abs() < 20.0 && r > 80.0 && r < 180.0
}

fn is_orange(r: f64, g: f64, b: f64) -> bool {
    r > 160.0 && g > 80.0 && g < 150.0 && b < 80.0
}

/// Population mean and standard deviation
fn mean_std(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let (mean, variance) = mean_variance(values);
    (mean, variance.sqrt())
}

fn mean_variance(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let mut n = 0usize;
    let mut sum = 0.0;
    for v in values.clone() {
        sum += v;
        n += 1;
    }
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / n as f64;
    let sq: f64 = values.map(|v| (v - mean) * (v - mean)).sum();
    (mean, sq / n as f64)
}

/// Weighted composite in [0, 100]
pub fn health_score(
    green_pixel_ratio: f64,
    brown_ratio: f64,
    yellow_ratio: f64,
    dark_ratio: f64,
    edge_density: f64,
) -> f64 {
    let score = green_pixel_ratio * 40.0
        + (1.0 - brown_ratio) * 20.0
        + (1.0 - yellow_ratio) * 15.0
        + (1.0 - dark_ratio) * 10.0
        + (1.0 - (edge_density / EDGE_SATURATION).min(1.0)) * 15.0;
    score.clamp(0.0, 100.0)
}

fn extract_rgb(width: usize, height: usize, pixels: &[[f32; 3]]) -> FeatureVector {
    // Constructors reject empty grids; the floor keeps ratios finite regardless
    let total = pixels.len().max(1) as f64;
    let channel = |c: usize| pixels.iter().map(move |p| f64::from(p[c]));
    let (mean_r, std_r) = mean_std(channel(0));
    let (mean_g, std_g) = mean_std(channel(1));
    let (mean_b, std_b) = mean_std(channel(2));

    let mut green_health_sum = 0.0;
    let mut counts = [0usize; 7];
    for p in pixels {
        let (r, g, b) = (f64::from(p[0]), f64::from(p[1]), f64::from(p[2]));
        green_health_sum += g / (r + b + 1.0);
        let hits = [
            is_green(r, g, b),
            is_brown(r, g, b),
            is_yellow(r, g, b),
            is_dark(r, g, b),
            is_white(r, g, b),
            is_gray(r, g, b),
            is_orange(r, g, b),
        ];
        for (count, hit) in counts.iter_mut().zip(hits) {
            *count += usize::from(hit);
        }
    }
    let ratio = |i: usize| counts[i] as f64 / total;

    let lumas: Vec<f64> = pixels
        .iter()
        .map(|p| luma(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
        .collect();
    let (_, texture_variance) = mean_variance(lumas.iter().copied());
    let local_texture_mean = local_texture_mean(&lumas, width, height);
    let edge_density = edge_density(&lumas, width, height);

    let green_pixel_ratio = ratio(0);
    let brown_ratio = ratio(1);
    let yellow_ratio = ratio(2);
    let dark_ratio = ratio(3);

    FeatureVector {
        mean_r,
        mean_g,
        mean_b,
        std_r,
        std_g,
        std_b,
        green_health: green_health_sum / total,
        green_pixel_ratio,
        brown_ratio,
        yellow_ratio,
        dark_ratio,
        white_ratio: ratio(4),
        gray_ratio: ratio(5),
        orange_ratio: ratio(6),
        texture_variance,
        local_texture_mean,
        edge_density,
        health_score: health_score(
            green_pixel_ratio,
            brown_ratio,
            yellow_ratio,
            dark_ratio,
            edge_density,
        ),
        is_grayscale: false,
    }
}

fn extract_luma(samples: &[f32]) -> FeatureVector {
    let (mean, variance) = mean_variance(samples.iter().map(|&v| f64::from(v)));
    let std = variance.sqrt();

    FeatureVector {
        mean_r: mean,
        mean_g: mean,
        mean_b: mean,
        std_r: std,
        std_g: std,
        std_b: std,
        green_health: GRAYSCALE_GREEN_HEALTH,
        green_pixel_ratio: 0.0,
        brown_ratio: GRAYSCALE_BROWN_RATIO,
        yellow_ratio: GRAYSCALE_YELLOW_RATIO,
        dark_ratio: GRAYSCALE_DARK_RATIO,
        white_ratio: 0.0,
        gray_ratio: 0.0,
        orange_ratio: 0.0,
        texture_variance: variance,
        local_texture_mean: 0.0,
        edge_density: 0.0,
        health_score: health_score(
            0.0,
            GRAYSCALE_BROWN_RATIO,
            GRAYSCALE_YELLOW_RATIO,
            GRAYSCALE_DARK_RATIO,
            0.0,
        ),
        is_grayscale: true,
    }
}

/// Mean of per-block luma variance over full 8×8 blocks
fn local_texture_mean(lumas: &[f64], width: usize, height: usize) -> f64 {
    let blocks_x = width / TEXTURE_BLOCK;
    let blocks_y = height / TEXTURE_BLOCK;
    if blocks_x == 0 || blocks_y == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = (0..TEXTURE_BLOCK).flat_map(move |dy| {
                let row = (by * TEXTURE_BLOCK + dy) * width + bx * TEXTURE_BLOCK;
                row..row + TEXTURE_BLOCK
            });
            let (_, variance) = mean_variance(block.map(|i| lumas[i]));
            total += variance;
        }
    }
    total / (blocks_x * blocks_y) as f64
}

/// Average of mean absolute horizontal and vertical luma differences
fn edge_density(lumas: &[f64], width: usize, height: usize) -> f64 {
    let horizontal = if width > 1 {
        let mut sum = 0.0;
        for y in 0..height {
            let row = &lumas[y * width..(y + 1) * width];
            for pair in row.windows(2) {
                sum += (pair[1] - pair[0]).abs();
            }
        }
        sum / (height * (width - 1)) as f64
    } else {
        0.0
    };

    let vertical = if height > 1 {
        let mut sum = 0.0;
        for y in 1..height {
            for x in 0..width {
                sum += (lumas[y * width + x] - lumas[(y - 1) * width + x]).abs();
            }
        }
        sum / ((height - 1) * width) as f64
    } else {
        0.0
    };

    (horizontal + vertical) / 2.0
}
