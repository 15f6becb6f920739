//! The failure taxonomy shared by server handlers and the client.
//!
//! Four categories cover every failure surfaced to a caller. Each maps to a
//! fixed HTTP status so the code and the envelope body never disagree.

use thiserror::Error;

/// Failures surfaced through the API, by category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport or backend failure reaching the service
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The requested collection or entity has no content (404)
    #[error("{0}")]
    NotFound(String),

    /// The request was malformed or referenced a missing entity (400)
    #[error("{0}")]
    Validation(String),

    /// Credentials were rejected (401)
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    /// HTTP status code this category maps to.
    ///
    /// `NetworkFailure` is the catch-all for backend trouble, reported as 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NetworkFailure(_) => 500,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
        }
    }

    /// The message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NetworkFailure(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::Unauthorized(m) => m,
        }
    }
}
