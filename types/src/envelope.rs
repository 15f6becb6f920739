//! The uniform response envelope.
//!
//! Every endpoint responds with the same shape: the HTTP status code echoed
//! in the body, plus `data` on success or `message` on error. The outer HTTP
//! status always agrees with the body's `status` field.

use serde::{Deserialize, Serialize};

/// The wire envelope wrapping every response body.
///
/// Success responses carry `{"status": 200, "data": ...}`; error responses
/// carry the failing code and a reason, e.g. `{"status": 404, "message":
/// "No orders found"}`. The absent field is omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP status code, echoed in the body
    pub status: u16,

    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable failure reason, present on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Build a success envelope around a payload
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            status: 200,
            data: Some(data),
            message: None,
        }
    }

    /// Build an error envelope with the failing status code and a message
    #[must_use]
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Whether this envelope reports success
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_carries_200_and_omits_message() {
        let envelope = Envelope::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"status": 200, "data": [1, 2, 3]}));
    }

    #[test]
    fn error_envelope_carries_its_code_and_omits_data() {
        let envelope: Envelope<()> = Envelope::error(404, "No orders found");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"status": 404, "message": "No orders found"}));
    }

    #[test]
    fn error_envelope_round_trips() {
        let json = r#"{"status":401,"message":"Invalid credentials"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.status, 401);
        assert_eq!(envelope.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn the_whole_2xx_range_reads_as_success() {
        let envelope = Envelope::ok(());
        assert!(envelope.is_success());

        let accepted = Envelope {
            status: 202,
            data: Some(()),
            message: None,
        };
        assert!(accepted.is_success());

        let failed: Envelope<()> = Envelope::error(500, "database error");
        assert!(!failed.is_success());
    }
}
