//! Error type shared by the store, client and CLI.
//!
//! A `401` from the API is not an error: it is reported as
//! [`crate::client::ApiOutcome::LoggedOut`]. Everything here is a failure the
//! caller cannot recover from by logging in again.

/// Errors produced by the session client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A configuration value was missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The HTTP transport failed (connection refused, DNS, broken body, ...).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The stored token could not be encoded as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A request body or the storage file was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The session storage could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// A social login provider name was not recognized.
    #[error("unknown social login provider: {0}")]
    UnknownProvider(String),
}
