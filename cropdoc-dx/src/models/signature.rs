//! Disease signatures: the static knowledge the classifier scores against

use super::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crop species covered by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Tomato,
    Rice,
    Wheat,
    Corn,
    Potato,
    Cotton,
    Soybean,
}

impl Crop {
    pub const ALL: [Crop; 7] = [
        Crop::Tomato,
        Crop::Rice,
        Crop::Wheat,
        Crop::Corn,
        Crop::Potato,
        Crop::Cotton,
        Crop::Soybean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Tomato => "tomato",
            Crop::Rice => "rice",
            Crop::Wheat => "wheat",
            Crop::Corn => "corn",
            Crop::Potato => "potato",
            Crop::Cotton => "cotton",
            Crop::Soybean => "soybean",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = String;

    /// Case-insensitive; accepts "maize" as corn
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "maize" {
            return Ok(Crop::Corn);
        }
        Crop::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown crop '{}'", s))
    }
}

/// Named threshold predicate of a visual signature
///
/// Declaration order is the order contributions are summed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKey {
    BrownRatioMin,
    YellowRatioMin,
    DarkRatioMin,
    WhiteRatioMin,
    GrayRatioMin,
    OrangeRatioMin,
    GreenHealthMax,
    TextureVarianceMin,
    SpotDensityMin,
}

impl ThresholdKey {
    /// Score contributed when `features` satisfies threshold `t`, else `None`
    pub fn contribution(self, features: &FeatureVector, t: f64) -> Option<f64> {
        // Ratio minimums: (feature, base, slope)
        let ratio_min = |value: f64, base: f64, slope: f64| {
            (value >= t).then(|| base + (value - t) * slope)
        };

        match self {
            ThresholdKey::BrownRatioMin => ratio_min(features.brown_ratio, 20.0, 50.0),
            ThresholdKey::YellowRatioMin => ratio_min(features.yellow_ratio, 15.0, 40.0),
            ThresholdKey::DarkRatioMin => ratio_min(features.dark_ratio, 15.0, 30.0),
            ThresholdKey::WhiteRatioMin => ratio_min(features.white_ratio, 18.0, 45.0),
            ThresholdKey::GrayRatioMin => ratio_min(features.gray_ratio, 12.0, 30.0),
            ThresholdKey::OrangeRatioMin => ratio_min(features.orange_ratio, 20.0, 60.0),
            ThresholdKey::GreenHealthMax => (features.green_health <= t)
                .then(|| 10.0 + (t - features.green_health) * 20.0),
            ThresholdKey::TextureVarianceMin => (features.local_texture_mean >= t).then_some(8.0),
            // Thresholds are authored as fractions; edge density is in luma units
            ThresholdKey::SpotDensityMin => (features.edge_density >= t * 100.0).then_some(10.0),
        }
    }
}

/// Sparse set of thresholds; `None` means the feature does not participate
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualSignature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brown_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yellow_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orange_ratio_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_health_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_variance_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_density_min: Option<f64>,
}

impl VisualSignature {
    /// Present thresholds in [`ThresholdKey`] order
    pub fn thresholds(&self) -> impl Iterator<Item = (ThresholdKey, f64)> {
        [
            (ThresholdKey::BrownRatioMin, self.brown_ratio_min),
            (ThresholdKey::YellowRatioMin, self.yellow_ratio_min),
            (ThresholdKey::DarkRatioMin, self.dark_ratio_min),
            (ThresholdKey::WhiteRatioMin, self.white_ratio_min),
            (ThresholdKey::GrayRatioMin, self.gray_ratio_min),
            (ThresholdKey::OrangeRatioMin, self.orange_ratio_min),
            (ThresholdKey::GreenHealthMax, self.green_health_max),
            (ThresholdKey::TextureVarianceMin, self.texture_variance_min),
            (ThresholdKey::SpotDensityMin, self.spot_density_min),
        ]
        .into_iter()
        .filter_map(|(key, t)| t.map(|t| (key, t)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseSignature {
    pub crop: Crop,
    /// Mild to severe, indexed by severity index 0..=2
    pub severity_levels: [String; 3],
    pub visual_signature: VisualSignature,
    pub symptoms: String,
    pub treatment: Vec<String>,
    pub confidence_base: f64,
}

/// Named catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(flatten)]
    pub signature: DiseaseSignature,
}
