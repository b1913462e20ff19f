//! Error types for session establishment and audit queries.

use thiserror::Error;

/// Errors while establishing the audit API session. Always fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authentication exchange could not be carried out.
    #[error("authentication request failed: {0}")]
    TokenRequest(#[from] reqwest::Error),

    /// The authority rejected the credentials.
    #[error("token endpoint rejected the request (HTTP {status}): {message}")]
    TokenRejected { status: u16, message: String },

    /// Client certificate could not be read.
    #[error("failed to read client certificate: {0}")]
    Certificate(#[from] std::io::Error),

    /// Required credential material is absent.
    #[error("missing credential material: {0}")]
    MissingSecret(String),

    /// The user did not complete device-code sign-in in time.
    #[error("device code sign-in expired before completion")]
    DeviceCodeExpired,
}

/// Errors from a single audit log query. Recoverable per batch: the batch
/// yields zero rows and the run continues with the next window.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The search request could not be sent or decoded.
    #[error("audit query failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The audit API answered with a non-success status.
    #[error("audit API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}
