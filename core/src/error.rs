//! Error types for the request client.
//!
//! # Design
//! `Url` and `Network` are the two failures a user sees in practice: the
//! address could not be understood, or nothing usable came back from it.
//! `Header` and `Body` cover caller input that cannot be put on the wire.
//! An HTTP error status is not an error here; it is returned as a response.

use thiserror::Error;

/// Errors returned by `RequestClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The URL is malformed, has no host, or uses an unsupported scheme.
    #[error("invalid URL `{url}`: {reason}")]
    Url { url: String, reason: String },

    /// The host could not be reached or the exchange failed in transit.
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// A header name or value is not valid on the wire.
    #[error("invalid header `{name}`: {reason}")]
    Header { name: String, reason: String },

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Body(String),
}

impl ClientError {
    pub fn is_url(&self) -> bool {
        matches!(self, ClientError::Url { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network { .. })
    }
}
