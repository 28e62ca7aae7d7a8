//! Error types for the billing API client.
//!
//! # Design
//! The billing service has one failure shape: a non-2xx status with a body
//! the operator needs to read. `Http` carries both and renders them as
//! `"{status}: {body}"` so screens can show the text verbatim. The remaining
//! variants cover the Rust side of the boundary: no response at all, or a
//! payload that does not match the typed shape.

use thiserror::Error;

/// Errors returned by `BillingClient` parse methods and `Transport`s.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..300.
    #[error("{status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `Http` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
