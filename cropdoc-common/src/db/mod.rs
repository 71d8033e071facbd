//! Database layer: connection setup and schema

pub mod init;

pub use init::{get_schema_version, init_database, init_schema, SCHEMA_VERSION};
