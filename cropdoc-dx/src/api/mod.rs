//! HTTP API handlers for cropdoc-dx

pub mod catalog;
pub mod detection;
pub mod health;
pub mod history;

pub use catalog::catalog_routes;
pub use detection::detection_routes;
pub use health::health_routes;
pub use history::history_routes;
