//! Database access for cropdoc-dx
//!
//! Schema lives in cropdoc-common; this module holds the queries.

pub mod analyses;
