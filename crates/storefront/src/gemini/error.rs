//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API.
///
/// Upstream failures stay typed all the way to the caller so the chat
/// endpoint can log and alert on them distinctly from input validation,
/// even though the shopper only ever sees a fixed fallback reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// Error status from the API (e.g., `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no candidate text.
    #[error("response contained no candidate text")]
    Empty,
}

/// API error response from Gemini.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// HTTP status code echoed by the API.
    #[serde(default)]
    pub code: i32,
    /// Error message.
    pub message: String,
    /// Error status (e.g., `INVALID_ARGUMENT`, `PERMISSION_DENIED`).
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");

        let err = AssistantError::Api {
            status: "INVALID_ARGUMENT".to_string(),
            message: "contents is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (INVALID_ARGUMENT): contents is required"
        );
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.message, "API key not valid");
        assert_eq!(response.error.status, "INVALID_ARGUMENT");
    }
}
