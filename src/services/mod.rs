//! HTTP boundaries to the external collaborators.
//!
//! The platform's speech-to-text and classification models run behind
//! third-party APIs; these clients forward requests and hand back the
//! responses as-is. No retries, no emulation — a failure here is the
//! remote service's failure, surfaced to the caller.

pub mod classification;
pub mod transcription;

pub use classification::*;
pub use transcription::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Could not reach {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response payload: {0}")]
    ResponseParsing(String),
}

/// Map a reqwest failure onto the service error taxonomy.
pub(crate) fn map_transport_error(base_url: &str, e: reqwest::Error) -> ServiceError {
    if e.is_connect() {
        ServiceError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        ServiceError::HttpClient(format!("Request timed out: {e}"))
    } else {
        ServiceError::HttpClient(e.to_string())
    }
}
