//! Signature scoring and branch selection
//!
//! The healthy check runs first. Otherwise every catalog entry is scored and
//! the highest score wins, earlier entries winning exact ties. A best score
//! under [`MIN_MATCH_SCORE`] (or an empty catalog) yields general stress.

use super::signature_catalog::SignatureCatalog;
use crate::models::{CatalogEntry, Crop, FeatureVector, Outcome, ThresholdKey};
use serde::Serialize;
use tracing::debug;

/// Best scores below this fall back to general stress
pub const MIN_MATCH_SCORE: f64 = 5.0;

pub const CROP_MATCH_BONUS: f64 = 15.0;
pub const CROP_MISMATCH_PENALTY: f64 = 5.0;

/// Cap on the score-derived confidence boost
const MAX_SCORE_BOOST: f64 = 12.0;
const MAX_MATCH_CONFIDENCE: f64 = 97.5;
const MAX_HEALTHY_CONFIDENCE: f64 = 99.5;

/// One satisfied threshold and the points it earned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub key: ThresholdKey,
    pub threshold: f64,
    pub points: f64,
}

/// How an entry's score was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// +15 on crop match, -5 on mismatch, 0 without a hint
    pub crop_adjustment: f64,
    pub contributions: Vec<Contribution>,
    pub total: f64,
}

/// Healthy-leaf predicate
pub fn is_healthy(f: &FeatureVector) -> bool {
    f.green_health > 0.55
        && f.brown_ratio < 0.08
        && f.yellow_ratio < 0.08
        && f.dark_ratio < 0.05
        && f.health_score > 65.0
}

/// Score one entry
///
/// Summation order is mismatch penalty, thresholds in key order, then match
/// bonus, so totals are reproducible to the bit.
pub fn score_entry(
    entry: &CatalogEntry,
    features: &FeatureVector,
    crop_hint: Option<Crop>,
) -> ScoreBreakdown {
    let crop = entry.signature.crop;
    let mut total = 0.0;
    let mut crop_adjustment = 0.0;

    if crop_hint.is_some_and(|hint| hint != crop) {
        total -= CROP_MISMATCH_PENALTY;
        crop_adjustment = -CROP_MISMATCH_PENALTY;
    }

    let mut contributions = Vec::new();
    for (key, threshold) in entry.signature.visual_signature.thresholds() {
        if let Some(points) = key.contribution(features, threshold) {
            total += points;
            contributions.push(Contribution {
                key,
                threshold,
                points,
            });
        }
    }

    if crop_hint == Some(crop) {
        total += CROP_MATCH_BONUS;
        crop_adjustment = CROP_MATCH_BONUS;
    }

    ScoreBreakdown {
        crop_adjustment,
        contributions,
        total,
    }
}

/// Severity index 0..=2 from brown + yellow + dark area
pub fn severity_index(features: &FeatureVector, levels: usize) -> usize {
    let combined = features.combined_damage();
    let index = if combined > 0.35 {
        2
    } else if combined > 0.18 {
        1
    } else {
        0
    };
    index.min(levels.saturating_sub(1))
}

/// Pick the outcome for a feature vector
///
/// Total: every input maps to one of the three outcome variants.
pub fn classify<'a>(
    catalog: &'a SignatureCatalog,
    features: &FeatureVector,
    crop_hint: Option<Crop>,
) -> Outcome<'a> {
    if is_healthy(features) {
        let confidence = (92.0 + features.health_score * 0.07).min(MAX_HEALTHY_CONFIDENCE);
        return Outcome::Healthy { confidence };
    }

    let mut best: Option<(&CatalogEntry, f64)> = None;
    for entry in catalog.iter() {
        let score = score_entry(entry, features, crop_hint).total;
        debug!(disease = %entry.name, score, "Scored signature");
        // Strict comparison keeps the earliest entry on ties
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((entry, score));
        }
    }

    match best {
        Some((entry, score)) if score >= MIN_MATCH_SCORE => {
            let confidence = (entry.signature.confidence_base
                + (score * 0.3).min(MAX_SCORE_BOOST))
            .min(MAX_MATCH_CONFIDENCE);
            Outcome::Matched {
                entry,
                score,
                confidence,
                severity_index: severity_index(features, entry.signature.severity_levels.len()),
            }
        }
        _ => Outcome::GeneralStress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiseaseSignature, Status, VisualSignature};

    fn blank() -> FeatureVector {
        FeatureVector {
            mean_r: 0.0,
            mean_g: 0.0,
            mean_b: 0.0,
            std_r: 0.0,
            std_g: 0.0,
            std_b: 0.0,
            green_health: 1.0,
            green_pixel_ratio: 0.0,
            brown_ratio: 0.0,
            yellow_ratio: 0.0,
            dark_ratio: 0.0,
            white_ratio: 0.0,
            gray_ratio: 0.0,
            orange_ratio: 0.0,
            texture_variance: 0.0,
            local_texture_mean: 0.0,
            edge_density: 0.0,
            health_score: 60.0,
            is_grayscale: false,
        }
    }

    fn custom(name: &str, crop: Crop, sig: VisualSignature) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            signature: DiseaseSignature {
                crop,
                severity_levels: ["Low".into(), "Mid".into(), "High".into()],
                visual_signature: sig,
                symptoms: String::new(),
                treatment: Vec::new(),
                confidence_base: 80.0,
            },
        }
    }

    #[test]
    fn test_healthy_branch_short_circuits() {
        let f = FeatureVector {
            green_health: 2.0,
            health_score: 100.0,
            ..blank()
        };
        let catalog = SignatureCatalog::builtin();
        match classify(&catalog, &f, Some(Crop::Tomato)) {
            Outcome::Healthy { confidence } => assert!((confidence - 99.0).abs() < 1e-9),
            other => panic!("expected healthy, got {:?}", other),
        }
    }

    #[test]
    fn test_healthy_requires_every_condition() {
        let ok = FeatureVector {
            green_health: 0.6,
            health_score: 70.0,
            ..blank()
        };
        assert!(is_healthy(&ok));
        assert!(!is_healthy(&FeatureVector { brown_ratio: 0.08, ..ok.clone() }));
        assert!(!is_healthy(&FeatureVector { dark_ratio: 0.05, ..ok.clone() }));
        assert!(!is_healthy(&FeatureVector { health_score: 65.0, ..ok.clone() }));
        assert!(!is_healthy(&FeatureVector { green_health: 0.55, ..ok }));
    }

    #[test]
    fn test_no_evidence_falls_back() {
        // green_health above every green_health_max, no ratios
        let catalog = SignatureCatalog::builtin();
        let outcome = classify(&catalog, &blank(), None);
        assert_eq!(outcome, Outcome::GeneralStress);
        assert_eq!(outcome.status(), Status::UnknownStress);
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let catalog = SignatureCatalog::empty();
        let f = FeatureVector {
            brown_ratio: 0.5,
            green_health: 0.1,
            ..blank()
        };
        assert_eq!(classify(&catalog, &f, None), Outcome::GeneralStress);
    }

    #[test]
    fn test_crop_hint_bonus_and_penalty() {
        let entry = custom(
            "Brown Thing",
            Crop::Rice,
            VisualSignature {
                brown_ratio_min: Some(0.1),
                ..VisualSignature::default()
            },
        );
        let f = FeatureVector {
            brown_ratio: 0.3,
            ..blank()
        };

        let none = score_entry(&entry, &f, None);
        let hit = score_entry(&entry, &f, Some(Crop::Rice));
        let miss = score_entry(&entry, &f, Some(Crop::Wheat));

        assert!((none.total - 30.0).abs() < 1e-9);
        assert_eq!(hit.crop_adjustment, 15.0);
        assert!((hit.total - none.total - 15.0).abs() < 1e-9);
        assert_eq!(miss.crop_adjustment, -5.0);
        assert!((miss.total - none.total + 5.0).abs() < 1e-9);
        assert_eq!(hit.contributions.len(), 1);
    }

    #[test]
    fn test_hint_alone_can_reach_minimum() {
        // A hinted entry with no satisfied thresholds still scores 15
        let catalog = SignatureCatalog::from_entries(vec![custom(
            "White Thing",
            Crop::Cotton,
            VisualSignature {
                white_ratio_min: Some(0.5),
                ..VisualSignature::default()
            },
        )])
        .unwrap();

        match classify(&catalog, &blank(), Some(Crop::Cotton)) {
            Outcome::Matched { score, .. } => assert_eq!(score, 15.0),
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_ties_go_to_earlier_entry() {
        let sig = VisualSignature {
            yellow_ratio_min: Some(0.1),
            ..VisualSignature::default()
        };
        let first = custom("First", Crop::Wheat, sig.clone());
        let second = custom("Second", Crop::Wheat, sig);
        let f = FeatureVector {
            yellow_ratio: 0.2,
            ..blank()
        };

        let forward = SignatureCatalog::from_entries(vec![first.clone(), second.clone()]).unwrap();
        let reverse = SignatureCatalog::from_entries(vec![second, first]).unwrap();

        let name = |o: Outcome<'_>| match o {
            Outcome::Matched { entry, .. } => entry.name.clone(),
            other => panic!("expected match, got {:?}", other),
        };
        assert_eq!(name(classify(&forward, &f, None)), "First");
        assert_eq!(name(classify(&reverse, &f, None)), "Second");
    }

    #[test]
    fn test_match_confidence_capped() {
        let entry = custom(
            "Orange Thing",
            Crop::Wheat,
            VisualSignature {
                orange_ratio_min: Some(0.1),
                ..VisualSignature::default()
            },
        );
        let catalog = SignatureCatalog::from_entries(vec![entry]).unwrap();
        let f = FeatureVector {
            orange_ratio: 0.9,
            ..blank()
        };

        // score = 20 + 0.8 × 60 = 68, boost capped at 12
        match classify(&catalog, &f, None) {
            Outcome::Matched { confidence, .. } => assert!((confidence - 92.0).abs() < 1e-9),
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[test]
    fn test_severity_bands() {
        let with = |brown, yellow, dark| FeatureVector {
            brown_ratio: brown,
            yellow_ratio: yellow,
            dark_ratio: dark,
            ..blank()
        };
        assert_eq!(severity_index(&with(0.1, 0.05, 0.0), 3), 0);
        assert_eq!(severity_index(&with(0.1, 0.05, 0.05), 3), 1);
        assert_eq!(severity_index(&with(0.3, 0.05, 0.05), 3), 2);
        // Clamped to available levels
        assert_eq!(severity_index(&with(0.3, 0.05, 0.05), 2), 1);
        assert_eq!(severity_index(&with(0.3, 0.05, 0.05), 0), 0);
    }

    #[test]
    fn test_severity_band_edges_exclusive() {
        let with = |brown, yellow, dark| FeatureVector {
            brown_ratio: brown,
            yellow_ratio: yellow,
            dark_ratio: dark,
            ..blank()
        };
        // These sums are exact in f64
        assert_eq!(with(0.25, 0.1, 0.0).combined_damage(), 0.35);
        assert_eq!(with(0.1, 0.08, 0.0).combined_damage(), 0.18);

        assert_eq!(severity_index(&with(0.25, 0.1, 0.0), 3), 1);
        assert_eq!(severity_index(&with(0.1, 0.08, 0.0), 3), 0);
        assert_eq!(severity_index(&with(0.26, 0.1, 0.0), 3), 2);
        assert_eq!(severity_index(&with(0.11, 0.08, 0.0), 3), 1);
    }
}
