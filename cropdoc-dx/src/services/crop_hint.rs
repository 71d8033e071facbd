//! Crop hint derivation from filenames and form fields

use crate::models::Crop;

/// Keywords searched in upload filenames, in priority order
const FILENAME_KEYWORDS: [(&str, Crop); 8] = [
    ("tomato", Crop::Tomato),
    ("rice", Crop::Rice),
    ("wheat", Crop::Wheat),
    ("corn", Crop::Corn),
    ("maize", Crop::Corn),
    ("potato", Crop::Potato),
    ("cotton", Crop::Cotton),
    ("soybean", Crop::Soybean),
];

/// First keyword (in priority order, not position) found in the filename
///
/// `"potato_vs_tomato.png"` hints tomato.
pub fn from_filename(filename: &str) -> Option<Crop> {
    let lower = filename.to_lowercase();
    FILENAME_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, crop)| *crop)
}

/// Explicit crop wins over the filename; blank or unknown explicit values are ignored
pub fn resolve(explicit: Option<&str>, filename: Option<&str>) -> Option<Crop> {
    explicit
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| s.parse().ok())
        .or_else(|| filename.and_then(from_filename))
}
