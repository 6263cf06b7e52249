//! Error type for every remote list call.
//!
//! # Design
//! Callers treat all failures alike: the view state turns any of these into a
//! fixed, operation-specific message. The variants exist only so logs can say
//! what actually went wrong. A 404 is reported as `Status` like any other
//! non-2xx answer.

use thiserror::Error;

/// Any failure of a remote list call: network, status, or payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The host could not complete the round-trip at all.
    #[error("request failed: {0}")]
    Network(String),
}
