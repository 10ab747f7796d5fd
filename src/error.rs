//! Error types for the cache bridge
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Bridge Error Enum ==
/// Reasons a delivered message is rejected before any side effect happens.
///
/// These never leave the bridge's public entry point; they are reported as
/// diagnostics and dropped.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Message is not object-shaped (text or raw bytes)
    #[error("Unknown message type received: {0}")]
    UnsupportedMessage(&'static str),

    /// Object payload could not be read from the transport
    #[error("Cannot read message payload: {0}")]
    Undecodable(#[from] serde_json::Error),

    /// Payload decoded, but is not a cache event
    #[error("Message payload is not a cache event (found {0})")]
    NotCacheEvent(&'static str),

    /// Invalidate event without a usable key
    #[error("Invalidate event carries no usable key")]
    MissingKey,
}

// == Probe Error Enum ==
/// Failure while invoking an event-kind accessor that the event does expose.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Accessor returned something other than an integer code
    #[error("Accessor {accessor} returned a non-integer value: {found}")]
    NotAnInteger {
        accessor: &'static str,
        found: String,
    },

    /// Accessor returned an integer outside the code range
    #[error("Accessor {accessor} returned an out-of-range code: {found}")]
    OutOfRange {
        accessor: &'static str,
        found: String,
    },
}

// == API Error Enum ==
/// Error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in the local cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP surface.
pub type Result<T> = std::result::Result<T, ApiError>;
