//! Data model for the diagnosis core

pub mod analysis;
pub mod diagnosis;
pub mod features;
pub mod pixel_grid;
pub mod signature;

pub use analysis::AnalysisRecord;
pub use diagnosis::{ClassificationResult, Outcome, Status};
pub use features::FeatureVector;
pub use pixel_grid::{PixelData, PixelGrid};
pub use signature::{CatalogEntry, Crop, DiseaseSignature, ThresholdKey, VisualSignature};
