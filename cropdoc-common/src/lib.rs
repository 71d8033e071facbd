//! # CropDoc Common Library
//!
//! Shared code for the CropDoc services:
//! - Error type used by configuration and database layers
//! - Configuration loading and root folder resolution
//! - Database initialization and schema
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
