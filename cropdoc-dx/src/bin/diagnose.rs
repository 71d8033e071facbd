//! diagnose - classify a leaf image from the command line
//!
//! Prints the diagnosis as pretty JSON on stdout. Exits non-zero when the
//! file is not an acceptable image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cropdoc_dx::models::Crop;
use cropdoc_dx::services::preprocessor::guess_content_type;
use cropdoc_dx::services::{crop_hint, DiagnosisEngine, PreprocessOptions};

#[derive(Parser, Debug)]
#[command(name = "diagnose")]
#[command(about = "Diagnose a crop leaf photograph")]
#[command(version)]
struct Args {
    /// Image file to analyze
    image: PathBuf,

    /// Crop shown in the image (defaults to a keyword in the file name)
    #[arg(short, long)]
    crop: Option<Crop>,

    /// Declared content type (defaults from the file extension)
    #[arg(long)]
    content_type: Option<String>,

    /// Analyze single-channel images as grayscale
    #[arg(long)]
    preserve_grayscale: bool,

    /// Include the extracted feature vector in the output
    #[arg(long)]
    features: bool,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let content_type = args
        .content_type
        .unwrap_or_else(|| guess_content_type(&args.image).to_string());
    let hint = args.crop.or_else(|| {
        args.image
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(crop_hint::from_filename)
    });

    let engine = DiagnosisEngine::with_builtin_catalog(PreprocessOptions {
        preserve_grayscale: args.preserve_grayscale,
    });
    let diagnosis = engine
        .diagnose(&bytes, &content_type, hint)
        .with_context(|| format!("Cannot diagnose {}", args.image.display()))?;

    let json = if args.features {
        serde_json::to_string_pretty(&diagnosis)?
    } else {
        serde_json::to_string_pretty(&diagnosis.result)?
    };
    println!("{}", json);

    Ok(())
}
