//! Feature vector computed from a pixel grid

use serde::{Deserialize, Serialize};

/// Color, texture and health summary of one leaf image
///
/// Ratios are fractions of the pixel count in [0, 1]; `health_score` is in
/// [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub mean_r: f64,
    pub mean_g: f64,
    pub mean_b: f64,
    pub std_r: f64,
    pub std_g: f64,
    pub std_b: f64,
    /// Mean of G / (R + B + 1)
    pub green_health: f64,
    pub green_pixel_ratio: f64,
    pub brown_ratio: f64,
    pub yellow_ratio: f64,
    pub dark_ratio: f64,
    pub white_ratio: f64,
    pub gray_ratio: f64,
    pub orange_ratio: f64,
    /// Population variance of luma over the whole grid
    pub texture_variance: f64,
    /// Mean luma variance over 8×8 blocks
    pub local_texture_mean: f64,
    pub edge_density: f64,
    pub health_score: f64,
    pub is_grayscale: bool,
}

impl FeatureVector {
    /// Brown + yellow + dark area, used to pick severity
    pub fn combined_damage(&self) -> f64 {
        self.brown_ratio + self.yellow_ratio + self.dark_ratio
    }

    /// Leaf area showing discoloration, in percent (unrounded)
    pub fn affected_area(&self) -> f64 {
        (self.brown_ratio + self.yellow_ratio) * 100.0
    }
}
