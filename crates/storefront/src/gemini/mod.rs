//! Google Generative Language API client for the shopping assistant.
//!
//! The storefront relays assembled prompts to the Gemini `generateContent`
//! endpoint and returns the model's text verbatim - no parsing or validation
//! of the reply happens here.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{ApiError, ApiErrorResponse, AssistantError};
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
