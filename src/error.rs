//! # Error Handling
//!
//! This module provides the unified error taxonomy for the Evently client.
//! Three failure classes cross the API boundary: client-side validation
//! failures (no request is issued), HTTP failures carrying the best
//! available server message, and transport failures where no response
//! arrived at all.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Fallback message for a non-2xx response whose body is unusable and whose
/// status code has no canonical reason phrase.
pub const GENERIC_REQUEST_MESSAGE: &str = "Request failed";

/// Fixed message for transport failures. Deliberately distinct from any
/// HTTP-derived message so the two failure classes stay distinguishable.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: unable to reach the server";

/// Errors produced by [`crate::client::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Pre-flight validation failure; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx HTTP response, with the message extracted from the body.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// No response reached us at all.
    #[error("{0}")]
    Network(String),

    /// 2xx response whose body did not decode into the expected shape.
    #[error("Malformed response: {details}")]
    MalformedResponse { details: String },
}

impl ClientError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Transport failure with the fixed generic connectivity message.
    pub fn network() -> Self {
        Self::Network(NETWORK_ERROR_MESSAGE.to_string())
    }
}

/// Error envelope returned by the backend. Both fields are optional; the
/// fallback chain below handles their absence.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: Option<String>,
    message: Option<String>,
}

/// Build a [`ClientError::Request`] from a non-2xx response.
///
/// Extraction chain, in order: a structured `detail` or `message` field in
/// the JSON body, the canonical HTTP status text, and finally the fixed
/// generic request message.
pub(crate) fn request_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.detail.or(envelope.message))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| GENERIC_REQUEST_MESSAGE.to_string());

    ClientError::Request {
        status: status.as_u16(),
        message,
    }
}
