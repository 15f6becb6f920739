//! Handler error type bridging the failure taxonomy to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cucina_types::{ApiError, Envelope};

/// Error returned by handlers.
///
/// Wraps the shared [`ApiError`] taxonomy and renders it as an error
/// envelope with the matching HTTP status code, so the code and the body
/// never disagree.
#[derive(Debug)]
pub struct ServerError(pub ApiError);

impl ServerError {
    /// 400: malformed request or missing entity (per-route choice)
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(ApiError::Validation(message.into()))
    }

    /// 404: nothing there
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(ApiError::NotFound(message.into()))
    }

    /// 401: credentials rejected
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(ApiError::Unauthorized(message.into()))
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ServerError {}

impl From<ApiError> for ServerError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<crate::repository::RepositoryError> for ServerError {
    fn from(err: crate::repository::RepositoryError) -> Self {
        Self(ApiError::NetworkFailure(err.to_string()))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = %status, message = %self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, message = %self.0, "Request rejected");
        }

        let body: Envelope<()> = Envelope::error(self.0.status_code(), self.0.message());
        (status, Json(body)).into_response()
    }
}
