//! Configuration loading and root folder resolution
//!
//! The root folder holds the analysis history database. It is resolved in
//! priority order:
//! 1. Command-line argument (handled by the binary, before the resolver)
//! 2. `CROPDOC_ROOT_FOLDER`, then `CROPDOC_ROOT` environment variables
//! 3. `root_folder` key of the module's TOML file
//! 4. OS-dependent compiled default
//!
//! A missing or unreadable TOML file never stops startup; the resolver logs a
//! warning and falls through to the next tier.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Primary environment variable for the root folder
pub const ROOT_FOLDER_ENV: &str = "CROPDOC_ROOT_FOLDER";

/// Fallback environment variable for the root folder
pub const ROOT_ENV: &str = "CROPDOC_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "cropdoc.db";

/// Compiled-in defaults used when nothing else is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: default_log_level(),
        }
    }
}

fn default_root_folder() -> PathBuf {
    // ~/.local/share/cropdoc, ~/Library/Application Support/cropdoc, %LOCALAPPDATA%\cropdoc
    dirs::data_local_dir()
        .map(|d| d.join("cropdoc"))
        .unwrap_or_else(|| PathBuf::from("./cropdoc_data"))
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// `[server]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `[analysis]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Keep single-channel uploads as luma grids instead of expanding to RGB
    pub preserve_grayscale: Option<bool>,
}

/// Per-module TOML configuration file
///
/// Every field is optional so that partial files (or files written by older
/// versions) still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl TomlConfig {
    /// Parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves the root folder and module configuration
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// `<config_dir>/cropdoc/<module>.toml`
    pub fn config_file_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cropdoc").join(format!("{}.toml", self.module_name)))
    }

    /// Load the module TOML file, falling back to defaults
    pub fn load_config(&self) -> TomlConfig {
        let Some(path) = self.config_file_path() else {
            warn!("Could not determine config directory; using defaults");
            return TomlConfig::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file; using defaults");
            return TomlConfig::default();
        }

        match TomlConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                TomlConfig::default()
            }
        }
    }

    /// Resolve the root folder from environment, TOML, then compiled default
    pub fn resolve(&self) -> PathBuf {
        self.resolve_with(&self.load_config())
    }

    /// Resolve using an already-loaded TOML config
    pub fn resolve_with(&self, config: &TomlConfig) -> PathBuf {
        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(root) = &config.root_folder {
            return root.clone();
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates the root folder and locates files inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder (and parents). Idempotent.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder).map_err(|e| {
            Error::Config(format!(
                "Cannot create root folder {}: {}",
                self.root_folder.display(),
                e
            ))
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}
