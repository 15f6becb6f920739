//! Resource endpoints.
//!
//! One module per resource. Handlers are thin mappings from HTTP to the
//! repository traits, always responding with the `{status, data|message}`
//! envelope.

pub mod categories;
pub mod items;
pub mod orders;
pub mod users;

use crate::error::ServerError;
use axum::Json;
use cucina_types::Envelope;
use serde::Serialize;
use std::str::FromStr;

/// Wrap a payload in a success envelope (HTTP 200).
pub(crate) fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(data))
}

/// Parse a path segment into a typed id.
///
/// A malformed id reads the same as a missing entity: the caller named
/// something that isn't there, so both map to the same rejection.
pub(crate) fn parse_id<T: FromStr>(raw: &str, message: &str) -> Result<T, ServerError> {
    raw.parse().map_err(|_| ServerError::validation(message))
}
