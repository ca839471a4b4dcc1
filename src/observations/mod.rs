//! Observation datasets and the review data model.

/// Fixed dataset catalog and URL resolution.
pub mod catalog;
/// Read-only application configuration.
pub mod config;
/// Dataset and media retrieval over HTTP.
pub mod fetch;
/// Record and dataset types plus decision application.
pub mod records;

pub use catalog::DatasetOption;
pub use records::{Dataset, Location, Record, RecordId, Signal, REJECTED_SPECIES};
