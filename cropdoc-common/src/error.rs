//! Common error types for CropDoc

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for CropDoc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the configuration and storage layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be located or is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration file exists but does not parse
    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A stored row could not be mapped back into its model
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}
