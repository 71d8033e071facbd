//! Classification outcome and the caller-facing result record

use super::{CatalogEntry, Crop};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Healthy,
    Diseased,
    UnknownStress,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Healthy => "healthy",
            Status::Diseased => "diseased",
            Status::UnknownStress => "unknown_stress",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(Status::Healthy),
            "diseased" => Ok(Status::Diseased),
            "unknown_stress" => Ok(Status::UnknownStress),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Which branch the classifier took
///
/// Every feature vector maps to exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    Healthy {
        confidence: f64,
    },
    Matched {
        entry: &'a CatalogEntry,
        score: f64,
        confidence: f64,
        /// 0..=2, already clamped to the entry's severity levels
        severity_index: usize,
    },
    /// No entry reached the minimum score
    GeneralStress,
}

impl Outcome<'_> {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Healthy { .. } => Status::Healthy,
            Outcome::Matched { .. } => Status::Diseased,
            Outcome::GeneralStress => Status::UnknownStress,
        }
    }
}

/// Final diagnosis returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub disease: String,
    pub status: Status,
    /// Crop of the matched entry (matched branch only)
    pub crop: Option<Crop>,
    /// Percent, one decimal
    pub confidence: f64,
    pub severity: String,
    /// 0-100, one decimal
    pub health_score: f64,
    /// Discolored leaf area in whole percent
    pub affected_area: u32,
    /// Winning signature score (matched branch only)
    pub match_score: Option<f64>,
    pub symptoms: String,
    pub treatment: Vec<String>,
    /// Plain-text report
    pub details: String,
}

impl ClassificationResult {
    pub fn is_healthy(&self) -> bool {
        self.status == Status::Healthy
    }
}
