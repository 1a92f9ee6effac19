//! HTTP client error types.

use thiserror::Error;

/// Transport-level failures.
///
/// An application-level refusal (`success: false`) is not a `FetchError`; it
/// decodes to `MutationOutcome::Rejected`. Everything here means the call
/// produced no usable envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("Request failed: {0}")]
    Network(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the JSON shape the endpoint promises.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to encode the request body.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}
