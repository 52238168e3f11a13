//! Error types for Mail.tm operations.

use thiserror::Error;

/// Errors returned by the client, the store, and the console handlers.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: timeout, DNS, connection refused, or a
    /// request that never produced a response.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response or store file did not contain the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O failure while writing the store or an export file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service rejected account creation because the address is taken
    /// (HTTP 422).
    #[error("email address is already taken")]
    AddressTaken,

    /// Any other unexpected HTTP status, with the response body for
    /// diagnostics.
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },
}
