//! The fixed set of selectable datasets and URL resolution against a base.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// One selectable dataset in the reviewer's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOption {
    /// Human-readable name shown in the selector.
    pub name: String,
    /// Resource path resolved against the configured base URL.
    pub path: String,
}

impl DatasetOption {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Built-in catalog used when the config file provides none.
pub fn built_in() -> Vec<DatasetOption> {
    vec![
        DatasetOption::new("Field week 1", "data/field_week_1.json"),
        DatasetOption::new("Field week 2", "data/field_week_2.json"),
        DatasetOption::new("Archive sweep", "data/archive.json"),
    ]
}

/// Errors raised while resolving a resource reference against the base URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid base URL {base}: {source}")]
    BadBase {
        base: String,
        source: url::ParseError,
    },
    #[error("Invalid resource reference {reference}: {source}")]
    BadReference {
        reference: String,
        source: url::ParseError,
    },
}

/// Resolve a dataset or media reference against the configured base URL.
///
/// Absolute references pass through unchanged; relative ones join onto the
/// base, which is treated as a directory regardless of a trailing slash.
pub fn resolve_url(base: &str, reference: &str) -> Result<Url, ResolveError> {
    let mut normalized = base.trim_end_matches('/').to_string();
    normalized.push('/');
    let base_url = Url::parse(&normalized).map_err(|source| ResolveError::BadBase {
        base: base.to_string(),
        source,
    })?;
    base_url
        .join(reference)
        .map_err(|source| ResolveError::BadReference {
            reference: reference.to_string(),
            source,
        })
}
