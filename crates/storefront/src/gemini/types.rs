//! Types for the Gemini API.
//!
//! These types match the Generative Language `generateContent` wire format.

use serde::{Deserialize, Serialize};

/// A piece of content in a request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content producer ("user" or "model").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The content parts.
    pub parts: Vec<Part>,
}

/// A single content part (text only - the storefront never sends media).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// The text content.
    pub text: String,
}

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// The conversation contents (a single user turn for the storefront).
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Build a single-turn request from a rendered prompt.
    #[must_use]
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Response from the `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates (usually exactly one).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The first candidate's first text part, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}

/// A single generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// The candidate content.
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (e.g., "STOP", "MAX_TOKENS").
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest::from_prompt("Hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        // No role is sent for single-turn prompts
        assert!(json["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_response_first_text() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "We stock 12 products."}]
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("We stock 12 products."));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_response_candidate_without_content() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_text().is_none());
    }
}
