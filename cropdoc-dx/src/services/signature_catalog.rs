//! Ordered, immutable catalog of disease signatures
//!
//! Catalog order is significant: when two entries score the same, the one
//! listed first wins. Entries are kept in authored order (tomato, rice,
//! wheat, corn, potato, cotton, soybean).

use crate::models::{CatalogEntry, Crop, DiseaseSignature, VisualSignature};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate catalog entry: {0}")]
    DuplicateName(String),
}

/// Read-only sequence of named disease signatures
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    entries: Vec<CatalogEntry>,
}

impl SignatureCatalog {
    /// The built-in catalog of 15 diseases
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Build a catalog from entries in the given order
    ///
    /// Names must be unique; lookup by name would otherwise be ambiguous.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(
    name: &str,
    crop: Crop,
    severity_levels: [&str; 3],
    visual_signature: VisualSignature,
    symptoms: &str,
    treatment: &[&str],
    confidence_base: f64,
) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        signature: DiseaseSignature {
            crop,
            severity_levels: severity_levels.map(String::from),
            visual_signature,
            symptoms: symptoms.to_string(),
            treatment: treatment.iter().map(|s| s.to_string()).collect(),
            confidence_base,
        },
    }
}

fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        entry(
            "Tomato Early Blight",
            Crop::Tomato,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.15),
                yellow_ratio_min: Some(0.1),
                green_health_max: Some(0.55),
                ..VisualSignature::default()
            },
            "Dark brown concentric rings (target spots) on older leaves, starting from lower canopy. Yellowing around spots.",
            &[
                "Apply Mancozeb 75% WP at 2.5g/L as preventive spray every 7-10 days",
                "Apply Chlorothalonil 75% WP at 2g/L for active infections",
                "Remove and destroy severely infected lower leaves",
                "Ensure proper plant spacing (60cm) for air circulation",
                "Mulch around base to prevent soil splash onto leaves",
                "Rotate crops - avoid planting tomato in same spot for 2 years",
            ],
            85.0,
        ),
        entry(
            "Tomato Late Blight",
            Crop::Tomato,
            ["Early", "Moderate", "Advanced"],
            VisualSignature {
                brown_ratio_min: Some(0.2),
                dark_ratio_min: Some(0.15),
                green_health_max: Some(0.45),
                ..VisualSignature::default()
            },
            "Water-soaked dark lesions on leaves and stems. White fuzzy mold on leaf undersides in humid conditions.",
            &[
                "Apply Metalaxyl + Mancozeb (Ridomil Gold MZ) at 2.5g/L immediately",
                "Spray Cymoxanil + Mancozeb at 3g/L as follow-up after 7 days",
                "Remove and burn all infected plant material (do NOT compost)",
                "Reduce overhead irrigation; use drip irrigation only",
                "Improve air circulation by proper staking and pruning",
                "Apply copper-based spray (Bordeaux mixture 1%) as preventive",
            ],
            83.0,
        ),
        entry(
            "Tomato Leaf Mold",
            Crop::Tomato,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                yellow_ratio_min: Some(0.18),
                green_health_max: Some(0.5),
                texture_variance_min: Some(30.0),
                ..VisualSignature::default()
            },
            "Yellow patches on upper leaf surface with olive-green to brown velvety mold on underside.",
            &[
                "Apply Chlorothalonil at 2g/L or Mancozeb at 2.5g/L",
                "Reduce greenhouse humidity below 85% with proper ventilation",
                "Remove lower leaves to improve air movement",
                "Avoid overhead watering and leaf wetting",
                "Space plants at 45-60cm for adequate airflow",
                "Use resistant tomato varieties in next season",
            ],
            81.0,
        ),
        entry(
            "Tomato Septoria Leaf Spot",
            Crop::Tomato,
            ["Early", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.12),
                green_health_max: Some(0.52),
                spot_density_min: Some(0.1),
                ..VisualSignature::default()
            },
            "Small circular spots (2-3mm) with dark borders and gray/tan centers on lower leaves first.",
            &[
                "Apply Mancozeb 75% WP at 2.5g/L every 7 days",
                "Copper hydroxide at 2g/L as alternative fungicide",
                "Remove and destroy lower infected leaves promptly",
                "Mulch with straw to prevent rain-splash transmission",
                "Maintain proper plant spacing for airflow",
                "Crop rotation with non-Solanaceae crops for 2 seasons",
            ],
            82.0,
        ),
        entry(
            "Rice Blast",
            Crop::Rice,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.18),
                green_health_max: Some(0.48),
                spot_density_min: Some(0.12),
                ..VisualSignature::default()
            },
            "Diamond/spindle-shaped lesions with gray center and brown borders on leaves. Can affect nodes and panicle neck.",
            &[
                "Apply Tricyclazole 75% WP at 0.6g/L (most effective preventive)",
                "Isoprothiolane 40% EC at 1.5ml/L for curative action",
                "Reduce nitrogen fertilizer application by 25%",
                "Maintain 2-3cm standing water during tillering stage",
                "Use blast-resistant varieties (e.g., IR64, MTU1010)",
                "Avoid late planting as it increases blast susceptibility",
            ],
            86.0,
        ),
        entry(
            "Rice Brown Spot",
            Crop::Rice,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.2),
                yellow_ratio_min: Some(0.08),
                green_health_max: Some(0.52),
                ..VisualSignature::default()
            },
            "Oval to circular brown spots with yellow halo on leaves. Common in nutrient-deficient soils.",
            &[
                "Apply Mancozeb 75% WP at 2.5g/L or Zineb 75% WP at 2.5g/L",
                "Improve soil fertility with balanced NPK (120:60:40 kg/ha)",
                "Apply potassium fertilizer (MOP 40 kg/ha) as deficiency worsens disease",
                "Seed treatment with Carbendazim 50% WP at 2g/kg seed",
                "Ensure adequate zinc nutrition (ZnSO4 at 25 kg/ha)",
                "Use disease-free certified seeds only",
            ],
            82.0,
        ),
        entry(
            "Rice Bacterial Leaf Blight",
            Crop::Rice,
            ["Early", "Moderate", "Severe"],
            VisualSignature {
                yellow_ratio_min: Some(0.2),
                green_health_max: Some(0.42),
                ..VisualSignature::default()
            },
            "Water-soaked yellowish stripes from leaf tip along margins. Leaves dry out turning grayish-white.",
            &[
                "No effective chemical cure; focus on prevention",
                "Apply Streptocycline at 0.5g + Copper Oxychloride at 2.5g per liter",
                "Drain field water during disease spread period",
                "Reduce nitrogen fertilizer by 30% during outbreak",
                "Use BLB-resistant varieties (e.g., Improved Samba Mahsuri)",
                "Remove and destroy infected debris after harvest",
            ],
            80.0,
        ),
        entry(
            "Wheat Rust",
            Crop::Wheat,
            ["Early", "Moderate", "Severe"],
            VisualSignature {
                orange_ratio_min: Some(0.15),
                green_health_max: Some(0.5),
                spot_density_min: Some(0.1),
                ..VisualSignature::default()
            },
            "Orange-brown pustules on leaf surface (stripe/leaf rust). Yellow-orange spores released on touch.",
            &[
                "Apply Propiconazole 25% EC at 1ml/L immediately upon detection",
                "Tebuconazole 25% EC at 1ml/L as stronger alternative",
                "Two sprays at 15-day interval for effective control",
                "Plant rust-resistant varieties (HD2967, DBW17) in next season",
                "Early sowing (before Nov 15) reduces rust risk significantly",
                "Avoid excessive nitrogen as it promotes lush growth favoring rust",
            ],
            87.0,
        ),
        entry(
            "Wheat Powdery Mildew",
            Crop::Wheat,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                white_ratio_min: Some(0.15),
                green_health_max: Some(0.55),
                texture_variance_min: Some(25.0),
                ..VisualSignature::default()
            },
            "White powdery fungal growth on upper leaf surface. Leaves may curl and turn yellow underneath.",
            &[
                "Apply Sulphur WP 80% at 2g/L (very effective for powdery mildew)",
                "Karathane (Dinocap) at 1ml/L as alternative",
                "Propiconazole 25% EC at 1ml/L for severe infections",
                "Avoid excess nitrogen fertilizer application",
                "Improve air circulation with proper row spacing (22.5cm)",
                "Grow tolerant varieties for affected regions",
            ],
            84.0,
        ),
        entry(
            "Corn Northern Leaf Blight",
            Crop::Corn,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.18),
                green_health_max: Some(0.48),
                ..VisualSignature::default()
            },
            "Long cigar-shaped gray-green to tan lesions (2-15cm) starting from lower leaves.",
            &[
                "Apply Mancozeb 75% WP at 2.5g/L at early detection",
                "Azoxystrobin 23% SC at 1ml/L for resistant strains",
                "Remove and destroy crop residue after harvest",
                "Rotate crops - avoid continuous maize cultivation",
                "Use tolerant hybrids recommended for your region",
                "Plant at recommended spacing (60x20cm) for air circulation",
            ],
            83.0,
        ),
        entry(
            "Corn Gray Leaf Spot",
            Crop::Corn,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                gray_ratio_min: Some(0.12),
                green_health_max: Some(0.5),
                spot_density_min: Some(0.08),
                ..VisualSignature::default()
            },
            "Rectangular gray to brown lesions restricted between leaf veins. Common in humid conditions.",
            &[
                "Apply Mancozeb at 2.5g/L preventively before tasseling",
                "Azoxystrobin at 1ml/L for moderate to severe cases",
                "Tillage to bury infected crop residue",
                "Crop rotation with soybean or legumes for 1-2 years",
                "Use GLS-tolerant maize hybrids",
                "Avoid late planting (increases disease pressure)",
            ],
            81.0,
        ),
        entry(
            "Potato Early Blight",
            Crop::Potato,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.16),
                green_health_max: Some(0.52),
                ..VisualSignature::default()
            },
            "Dark brown spots with concentric rings (target board pattern) on older leaves.",
            &[
                "Apply Mancozeb 75% WP at 2.5g/L every 7 days",
                "Chlorothalonil 75% WP at 2g/L as alternative",
                "Ensure balanced potassium nutrition (K₂O at 120 kg/ha)",
                "Remove lower senescent leaves to reduce inoculum",
                "Avoid water stress; maintain consistent irrigation",
                "Rotate with non-solanaceous crops",
            ],
            84.0,
        ),
        entry(
            "Potato Late Blight",
            Crop::Potato,
            ["Early", "Moderate", "Advanced"],
            VisualSignature {
                dark_ratio_min: Some(0.2),
                green_health_max: Some(0.4),
                ..VisualSignature::default()
            },
            "Water-soaked dark brown to black lesions expanding rapidly. White mold visible on underside in humid weather.",
            &[
                "Apply Metalaxyl + Mancozeb (Ridomil Gold) at 2.5g/L urgently",
                "Cymoxanil + Mancozeb 3g/L as second spray after 7 days",
                "Destroy all infected plant parts by burning",
                "Avoid overhead irrigation completely during outbreak",
                "Hill soil around stems to protect tubers from infection",
                "Harvest early if disease is severe to save tubers",
            ],
            85.0,
        ),
        entry(
            "Cotton Leaf Curl",
            Crop::Cotton,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                green_health_max: Some(0.55),
                ..VisualSignature::default()
            },
            "Upward curling and thickening of leaves with vein swelling. Stunted growth and reduced boll formation.",
            &[
                "Control whitefly vector: Imidacloprid 17.8% SL at 0.3ml/L",
                "Thiamethoxam 25% WG at 0.3g/L as alternative insecticide",
                "Spray Neem oil 3% at fortnightly intervals as deterrent",
                "Uproot and destroy severely infected plants immediately",
                "Use CLCuV-resistant cotton varieties (e.g., Bt cotton hybrids)",
                "Install yellow sticky traps (10 per acre) for whitefly monitoring",
            ],
            80.0,
        ),
        entry(
            "Soybean Rust",
            Crop::Soybean,
            ["Mild", "Moderate", "Severe"],
            VisualSignature {
                brown_ratio_min: Some(0.14),
                green_health_max: Some(0.52),
                spot_density_min: Some(0.1),
                ..VisualSignature::default()
            },
            "Small tan/brown to reddish-brown lesions on lower leaf surfaces. Premature defoliation in severe cases.",
            &[
                "Apply Tebuconazole 25% EC at 1ml/L at first detection",
                "Azoxystrobin + Cyproconazole at recommended dose",
                "Two foliar sprays at 15-day intervals for best control",
                "Early planting (June) to escape late-season rust buildup",
                "Use rust-tolerant soybean varieties",
                "Avoid excessive plant density; use 45x5cm spacing",
            ],
            83.0,
        ),
    ]
}
