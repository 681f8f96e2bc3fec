//! Error types for the Snappy API client.
//!
//! # Design
//! Every failed call ends up in exactly one of three dispatch categories:
//! the exchange never completed (`Transport`), the server answered with
//! anything other than 200 (`Remote`), or the body did not parse into the
//! requested shape (`Decode`). The API's error-body format is not modeled,
//! so `Remote` carries no status or body; a 404 and a 500 look the same to
//! callers. `Encode` covers payloads that fail to serialize before any
//! exchange is opened.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `SnappyClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connecting, sending, or reading the response failed.
    #[error("transport failure: {0}")]
    Transport(#[source] io::Error),

    /// The server answered with a status other than 200 OK.
    #[error("remote API returned a non-OK status")]
    Remote,

    /// The response body could not be decoded into the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ApiError::Remote)
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(io::Error::other(err))
    }
}

/// Split a `serde_json` failure from a structured decode into its two causes:
/// the bytes never arrived (transport) or they arrived and did not parse.
pub(crate) fn classify_decode(err: serde_json::Error) -> ApiError {
    if err.is_io() {
        ApiError::Transport(io::Error::from(err))
    } else {
        ApiError::Decode(err)
    }
}
