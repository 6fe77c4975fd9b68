use serde::{Deserialize, Serialize};

/// Error body returned by the backend.
///
/// Spring error payloads carry more fields (`timestamp`, `status`, `path`);
/// only the message is surfaced to users.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message
    pub message: String,
    /// Optional additional details about the error
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new error response with message and details.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Extract the message from a raw response body, if it is a JSON error
    /// object with a non-blank `message`.
    #[must_use]
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|error| error.message)
            .filter(|message| !message.trim().is_empty())
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_new() {
        let error = ErrorResponse::new("Test error");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_error_response_display() {
        assert_eq!(ErrorResponse::new("Simple error").to_string(), "Simple error");
        assert_eq!(
            ErrorResponse::with_details("Main error", "Additional info").to_string(),
            "Main error: Additional info"
        );
    }

    #[test]
    fn message_from_spring_body() {
        let body = r#"{"timestamp":"2024-01-20T10:00:00","status":400,"error":"Bad Request","message":"Email already in use","path":"/api/customers"}"#;
        assert_eq!(
            ErrorResponse::message_from_body(body),
            Some("Email already in use".to_string())
        );
    }

    #[test]
    fn message_from_body_ignores_blank_and_non_json() {
        assert_eq!(ErrorResponse::message_from_body(r#"{"message":"  "}"#), None);
        assert_eq!(ErrorResponse::message_from_body("<html>502</html>"), None);
        assert_eq!(ErrorResponse::message_from_body(""), None);
    }
}
