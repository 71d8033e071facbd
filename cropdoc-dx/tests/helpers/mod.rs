//! Test Helper Utilities
//!
//! Shared utilities for testing cropdoc-dx

#![allow(dead_code)]

pub mod db_utils;
pub mod leaf_generator;
pub mod multipart;

pub use db_utils::{create_test_db, create_unmigrated_db, test_app_state};
pub use leaf_generator::{
    encode_jpeg, encode_png, noisy_leaf, solid, striped, to_grid, LeafBand, BLIGHTED_BANDS, DARK,
    GREEN, MID_GRAY, SHADED_GREEN, TAN, YELLOW,
};
pub use multipart::{multipart_body, multipart_request, Part, BOUNDARY};
