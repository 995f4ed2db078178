use serde::Deserialize;
use serde::Serialize;

/// Envelope the backend answers with when a handler fails internally.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub request_id: String,
    pub success: bool,
    pub error_message: String,
}

impl ErrorResponse {
    /// Returns `None` unless `body` is a failed envelope with a message.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|e| !e.success && !e.error_message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failure_envelope() {
        let body = r#"{"request_id":"5f0c","success":false,"error_message":"db down"}"#;
        let err = ErrorResponse::parse(body).unwrap();
        assert_eq!(err.request_id, "5f0c");
        assert_eq!(err.error_message, "db down");
    }

    #[test]
    fn ignores_other_bodies() {
        assert_eq!(ErrorResponse::parse("Not Found"), None);
        assert_eq!(ErrorResponse::parse(r#"{"corp_id":"x"}"#), None);
    }
}
