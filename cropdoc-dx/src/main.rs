//! cropdoc-dx - Leaf diagnosis service
//!
//! Serves the diagnosis engine over HTTP and keeps a per-user history of
//! diagnoses in `<root>/cropdoc.db`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cropdoc_common::config::{RootFolderInitializer, RootFolderResolver};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cropdoc_dx::config::{ServiceSettings, SettingsOverrides};
use cropdoc_dx::services::{DiagnosisEngine, PreprocessOptions};
use cropdoc_dx::AppState;

const MODULE_NAME: &str = "cropdoc-dx";

/// Command-line arguments for cropdoc-dx
#[derive(Parser, Debug)]
#[command(name = "cropdoc-dx")]
#[command(about = "Crop leaf disease diagnosis service")]
#[command(version)]
struct Args {
    /// Root folder holding the history database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CROPDOC_DX_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CROPDOC_DX_PORT")]
    port: Option<u16>,

    /// Analyze single-channel images as grayscale instead of expanding to RGB
    #[arg(long)]
    preserve_grayscale: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = RootFolderResolver::new(MODULE_NAME);
    let toml_config = resolver.load_config();

    // RUST_LOG wins over the TOML level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting CropDoc Diagnosis (cropdoc-dx) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = match args.root_folder {
        Some(root) => {
            info!("Root folder from command line");
            root
        }
        None => resolver.resolve_with(&toml_config),
    };
    info!("Root folder: {}", root_folder.display());

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    let db_pool = cropdoc_common::db::init_database(&db_path)
        .await
        .context("Failed to open history database")?;

    let settings = ServiceSettings::resolve(
        SettingsOverrides {
            host: args.host,
            port: args.port,
            preserve_grayscale: args.preserve_grayscale,
        },
        &toml_config,
    );

    let engine = DiagnosisEngine::with_builtin_catalog(PreprocessOptions {
        preserve_grayscale: settings.preserve_grayscale,
    });
    info!("Signature catalog loaded: {} diseases", engine.catalog().len());

    let app = cropdoc_dx::build_router(AppState::new(db_pool, engine));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
