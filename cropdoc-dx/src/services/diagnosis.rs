//! Diagnosis engine: preprocessor → feature extractor → classifier → assembler

use super::classifier;
use super::feature_extractor::extract_features;
use super::preprocessor::{preprocess, PreprocessOptions};
use super::result_assembler::assemble;
use super::signature_catalog::SignatureCatalog;
use crate::error::DiagnosisError;
use crate::models::{ClassificationResult, Crop, FeatureVector, PixelGrid};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result plus the features it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub result: ClassificationResult,
    pub features: FeatureVector,
}

/// Stateless apart from the shared read-only catalog; cheap to clone
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: Arc<SignatureCatalog>,
    options: PreprocessOptions,
}

impl DiagnosisEngine {
    pub fn new(catalog: Arc<SignatureCatalog>, options: PreprocessOptions) -> Self {
        Self { catalog, options }
    }

    pub fn with_builtin_catalog(options: PreprocessOptions) -> Self {
        Self::new(Arc::new(SignatureCatalog::builtin()), options)
    }

    pub fn catalog(&self) -> &SignatureCatalog {
        &self.catalog
    }

    pub fn options(&self) -> PreprocessOptions {
        self.options
    }

    /// Classify an image upload
    pub fn classify(
        &self,
        bytes: &[u8],
        content_type: &str,
        crop_hint: Option<Crop>,
    ) -> Result<ClassificationResult, DiagnosisError> {
        self.diagnose(bytes, content_type, crop_hint)
            .map(|d| d.result)
    }

    /// Like [`classify`](Self::classify), also returning the feature vector
    pub fn diagnose(
        &self,
        bytes: &[u8],
        content_type: &str,
        crop_hint: Option<Crop>,
    ) -> Result<Diagnosis, DiagnosisError> {
        let grid = preprocess(bytes, content_type, self.options)?;
        Ok(self.diagnose_grid(&grid, crop_hint))
    }

    /// Run the pure part of the pipeline on an already-decoded grid
    pub fn diagnose_grid(&self, grid: &PixelGrid, crop_hint: Option<Crop>) -> Diagnosis {
        let features = extract_features(grid);
        let outcome = classifier::classify(&self.catalog, &features, crop_hint);
        let result = assemble(&outcome, &features);

        info!(
            disease = %result.disease,
            status = %result.status,
            confidence = result.confidence,
            severity = %result.severity,
            crop_hint = crop_hint.map(|c| c.as_str()),
            "Diagnosis complete"
        );

        Diagnosis { result, features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    #[test]
    fn test_uniform_green_grid_is_healthy() {
        let engine = DiagnosisEngine::with_builtin_catalog(PreprocessOptions::default());
        let grid = PixelGrid::uniform(224, 224, [40.0, 200.0, 40.0]).unwrap();
        let d = engine.diagnose_grid(&grid, None);
        assert_eq!(d.result.status, Status::Healthy);
        assert_eq!(d.result.confidence, 99.0);
        assert_eq!(d.result.health_score, 100.0);
    }

    #[test]
    fn test_grayscale_grid_uses_defaults() {
        let engine = DiagnosisEngine::with_builtin_catalog(PreprocessOptions::default());
        let grid = PixelGrid::from_luma(224, 224, vec![128.0; 224 * 224]).unwrap();
        let d = engine.diagnose_grid(&grid, None);

        assert!(d.features.is_grayscale);
        assert!((d.features.health_score - 52.75).abs() < 1e-9);
        assert_eq!(d.result.affected_area, 35);
    }

    #[test]
    fn test_alternate_catalog_injected() {
        let engine =
            DiagnosisEngine::new(Arc::new(SignatureCatalog::empty()), PreprocessOptions::default());
        let grid = PixelGrid::uniform(16, 16, [150.0, 100.0, 50.0]).unwrap();
        let d = engine.diagnose_grid(&grid, None);
        assert_eq!(d.result.status, Status::UnknownStress);
    }
}
