//! Dataset and media retrieval over HTTP.
//!
//! One GET per request through the shared agent, with size-bounded body
//! reads. There are no retries: a failed load is reported once and the
//! previously rendered state stays in place.

use thiserror::Error;

use crate::http_client;

use super::catalog::{self, ResolveError};
use super::records::Dataset;

const MAX_DATASET_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Upper bound for fetched image or audio payloads.
pub const MAX_MEDIA_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Errors raised while fetching any resource.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Response body error: {0}")]
    Body(String),
}

/// Errors raised while fetching and parsing a dataset document.
#[derive(Debug, Error)]
pub enum DatasetFetchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Invalid dataset payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// GET a resource reference resolved against the base URL.
pub fn fetch_bytes(
    base_url: &str,
    reference: &str,
    max_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    let url = catalog::resolve_url(base_url, reference)?;
    let response = match http_client::agent().get(url.as_str()).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
        Err(ureq::Error::Transport(err)) => return Err(FetchError::Transport(err.to_string())),
    };
    http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| FetchError::Body(err.to_string()))
}

/// GET and parse one dataset document shaped as `{"records": [...]}`.
pub fn fetch_dataset(base_url: &str, path: &str) -> Result<Dataset, DatasetFetchError> {
    let bytes = fetch_bytes(base_url, path, MAX_DATASET_RESPONSE_BYTES)?;
    let dataset = serde_json::from_slice::<Dataset>(&bytes)?;
    Ok(dataset)
}
