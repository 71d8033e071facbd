//! Diagnosis pipeline services

pub mod classifier;
pub mod crop_hint;
pub mod diagnosis;
pub mod feature_extractor;
pub mod preprocessor;
pub mod result_assembler;
pub mod signature_catalog;

pub use diagnosis::{Diagnosis, DiagnosisEngine};
pub use preprocessor::PreprocessOptions;
pub use signature_catalog::SignatureCatalog;
