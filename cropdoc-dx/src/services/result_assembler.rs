//! Turns a classifier outcome into the caller-facing result
//!
//! All three branches produce the same record shape. Healthy and general
//! stress use fixed text; matched diseases take theirs from the catalog.

use crate::models::{CatalogEntry, ClassificationResult, FeatureVector, Outcome, Status};

pub const HEALTHY_NAME: &str = "Healthy Crop";
pub const GENERAL_STRESS_NAME: &str = "General Plant Stress";
pub const GENERAL_STRESS_CONFIDENCE: f64 = 72.0;
pub const GENERAL_STRESS_SEVERITY: &str = "Mild";
pub const HEALTHY_SEVERITY: &str = "None";

const HEALTHY_SUMMARY: &str = "The crop appears healthy with good green coloration and minimal \
     signs of stress. Leaf structure and color patterns are within normal parameters.";

const HEALTHY_ADVICE: [&str; 4] = [
    "Continue current crop management practices",
    "Monitor weekly for any emerging symptoms",
    "Maintain consistent irrigation and fertilization schedule",
    "Apply preventive fungicide spray if disease risk is high in your area",
];

const STRESS_SUMMARY: &str = "Unidentified plant stress. Discoloration does not match any \
     known disease signature closely enough for a specific diagnosis.";

const STRESS_ADVICE: [&str; 5] = [
    "Check soil moisture and drainage",
    "Verify nutrient levels via soil test",
    "Apply broad-spectrum fungicide as precaution",
    "Monitor daily for disease progression",
    "Consult local agricultural extension officer",
];

/// Round half away from zero to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the result for an outcome
pub fn assemble(outcome: &Outcome<'_>, features: &FeatureVector) -> ClassificationResult {
    match outcome {
        Outcome::Healthy { confidence } => healthy(*confidence, features),
        Outcome::Matched {
            entry,
            score,
            confidence,
            severity_index,
        } => matched(entry, *score, *confidence, *severity_index, features),
        Outcome::GeneralStress => general_stress(features),
    }
}

fn affected_area(features: &FeatureVector) -> u32 {
    // Brown and yellow classes can overlap, so this may exceed 100
    features.affected_area().round() as u32
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn healthy(confidence: f64, features: &FeatureVector) -> ClassificationResult {
    let treatment: Vec<String> = HEALTHY_ADVICE.iter().map(|s| s.to_string()).collect();

    let details = format!(
        "Status: No disease detected\n\
         Plant Health Score: {:.0}/100\n\
         Green Coverage: {:.1}%\n\
         Brown Spots: {:.1}% (within normal range)\n\
         \n\
         Analysis Summary:\n{}\n\
         \n\
         Recommendations:\n{}",
        features.health_score,
        features.green_pixel_ratio * 100.0,
        features.brown_ratio * 100.0,
        HEALTHY_SUMMARY,
        bullet_list(&treatment),
    );

    ClassificationResult {
        disease: HEALTHY_NAME.to_string(),
        status: Status::Healthy,
        crop: None,
        confidence: round1(confidence),
        severity: HEALTHY_SEVERITY.to_string(),
        health_score: round1(features.health_score),
        affected_area: affected_area(features),
        match_score: None,
        symptoms: HEALTHY_SUMMARY.to_string(),
        treatment,
        details,
    }
}

fn matched(
    entry: &CatalogEntry,
    score: f64,
    confidence: f64,
    severity_index: usize,
    features: &FeatureVector,
) -> ClassificationResult {
    let sig = &entry.signature;
    let severity = sig
        .severity_levels
        .get(severity_index)
        .or(sig.severity_levels.last())
        .cloned()
        .unwrap_or_default();
    let area = affected_area(features);

    let details = format!(
        "Disease: {}\n\
         Crop: {}\n\
         Severity: {}\n\
         Health Score: {:.0}/100\n\
         Affected Area: ~{}% of visible leaf surface\n\
         \n\
         Symptoms Observed:\n{}\n\
         \n\
         Treatment Recommendations:\n{}",
        entry.name,
        capitalize(sig.crop.as_str()),
        severity,
        features.health_score,
        area,
        sig.symptoms,
        bullet_list(&sig.treatment),
    );

    ClassificationResult {
        disease: entry.name.clone(),
        status: Status::Diseased,
        crop: Some(sig.crop),
        confidence: round1(confidence),
        severity,
        health_score: round1(features.health_score),
        affected_area: area,
        match_score: Some(round1(score)),
        symptoms: sig.symptoms.clone(),
        treatment: sig.treatment.clone(),
        details,
    }
}

fn general_stress(features: &FeatureVector) -> ClassificationResult {
    let treatment: Vec<String> = STRESS_ADVICE.iter().map(|s| s.to_string()).collect();

    let details = format!(
        "Disease: Unidentified plant stress\n\
         Health Score: {:.0}/100\n\
         Brown Areas: {:.1}%\n\
         Yellow Areas: {:.1}%\n\
         \n\
         Recommendations:\n{}",
        features.health_score,
        features.brown_ratio * 100.0,
        features.yellow_ratio * 100.0,
        bullet_list(&treatment),
    );

    ClassificationResult {
        disease: GENERAL_STRESS_NAME.to_string(),
        status: Status::UnknownStress,
        crop: None,
        confidence: GENERAL_STRESS_CONFIDENCE,
        severity: GENERAL_STRESS_SEVERITY.to_string(),
        health_score: round1(features.health_score),
        affected_area: affected_area(features),
        match_score: None,
        symptoms: STRESS_SUMMARY.to_string(),
        treatment,
        details,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signature_catalog::SignatureCatalog;

    fn features() -> FeatureVector {
        FeatureVector {
            mean_r: 120.0,
            mean_g: 110.0,
            mean_b: 60.0,
            std_r: 10.0,
            std_g: 10.0,
            std_b: 10.0,
            green_health: 0.4,
            green_pixel_ratio: 0.2,
            brown_ratio: 0.256,
            yellow_ratio: 0.05,
            dark_ratio: 0.05,
            white_ratio: 0.0,
            gray_ratio: 0.0,
            orange_ratio: 0.0,
            texture_variance: 300.0,
            local_texture_mean: 40.0,
            edge_density: 6.0,
            health_score: 57.34,
            is_grayscale: false,
        }
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(93.04), 93.0);
        assert_eq!(round1(93.06), 93.1);
        assert_eq!(round1(72.0), 72.0);
    }

    #[test]
    fn test_matched_result() {
        let catalog = SignatureCatalog::builtin();
        let entry = catalog.get("Rice Blast").unwrap();
        let outcome = Outcome::Matched {
            entry,
            score: 40.123,
            confidence: 97.5,
            severity_index: 1,
        };

        let result = assemble(&outcome, &features());

        assert_eq!(result.disease, "Rice Blast");
        assert_eq!(result.status, Status::Diseased);
        assert_eq!(result.severity, "Moderate");
        assert_eq!(result.health_score, 57.3);
        assert_eq!(result.match_score, Some(40.1));
        assert_eq!(result.affected_area, 31);
        assert_eq!(result.treatment, entry.signature.treatment);
        assert!(result.details.starts_with("Disease: Rice Blast\nCrop: Rice\nSeverity: Moderate"));
        assert!(result.details.contains("Affected Area: ~31%"));
    }

    #[test]
    fn test_general_stress_template() {
        let result = assemble(&Outcome::GeneralStress, &features());

        assert_eq!(result.disease, GENERAL_STRESS_NAME);
        assert_eq!(result.status, Status::UnknownStress);
        assert_eq!(result.confidence, 72.0);
        assert_eq!(result.severity, "Mild");
        assert_eq!(result.crop, None);
        assert_eq!(result.treatment.len(), 5);
        assert!(result.details.contains("Brown Areas: 25.6%"));
        assert!(result
            .details
            .contains("Yellow Areas: 5.0%\n\nRecommendations:\n- Check soil moisture and drainage\n- Verify"));
        assert!(result.details.ends_with("- Consult local agricultural extension officer"));
    }

    #[test]
    fn test_healthy_template() {
        let result = assemble(&Outcome::Healthy { confidence: 98.0137 }, &features());

        assert_eq!(result.disease, HEALTHY_NAME);
        assert!(result.is_healthy());
        assert_eq!(result.confidence, 98.0);
        assert_eq!(result.severity, "None");
        assert_eq!(result.match_score, None);
        assert_eq!(result.treatment.len(), 4);
        assert!(result.details.ends_with("high in your area"));
    }
}
