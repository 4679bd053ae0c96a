//! Error types for the users API client.
//!
//! # Design
//! Three failures come from a round trip: the transport could not reach the
//! server, the server answered with a non-2xx status, or the body did not
//! decode. Two more are raised locally before any request leaves: an empty
//! form field and a payload that would not serialize.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, reset...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// A required field was empty; no request was sent.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
}

impl ApiError {
    /// The HTTP status for `Remote` failures, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
