//! Gemini API client for assistant replies.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, AssistantError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini API client.
///
/// Sends a rendered prompt to the `generateContent` endpoint and returns the
/// first candidate's text. One blocking round trip per call; no retries.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini API configuration containing API key, model, and base URL
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Self {
            inner: Arc::new(GeminiClientInner { client, endpoint }),
        }
    }

    /// Send a prompt and return the generated reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, the API returns an error
    /// response, or the response carries no candidate text.
    #[instrument(skip(self, prompt), fields(endpoint = %self.inner.endpoint))]
    pub async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle a response, extracting the reply text or a typed error.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<String, AssistantError> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| AssistantError::Parse(format!("Failed to parse response: {e}")))?;

        parsed
            .first_text()
            .map(ToString::to_string)
            .ok_or(AssistantError::Empty)
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AssistantError {
        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return AssistantError::RateLimited(retry_after);
        }

        // Check for bad credentials
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return AssistantError::Unauthorized("Invalid API key".to_string());
        }

        // Try to parse API error response
        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    AssistantError::Api {
                        status: api_error.error.status,
                        message: api_error.error.message,
                    }
                } else {
                    AssistantError::Api {
                        status: status.to_string(),
                        message: body.chars().take(200).collect(),
                    }
                }
            }
            Err(e) => AssistantError::Http(e),
        }
    }
}
