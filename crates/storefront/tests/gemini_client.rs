//! Integration tests for the Gemini client against a mock upstream.

use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hemline_storefront::config::GeminiConfig;
use hemline_storefront::gemini::{AssistantError, GeminiClient};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn config(api_base: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: SecretString::from("test-api-key"),
        model: "gemini-2.0-flash".to_string(),
        api_base: api_base.to_string(),
    }
}

fn reply_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{"text": text}]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"text": "What do you stock?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("We stock 12 items.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server.uri()));
    let reply = client.generate("What do you stock?").await.expect("reply");

    assert_eq!(reply, "We stock 12 items.");
}

#[tokio::test]
async fn generate_surfaces_api_errors_as_typed_variants() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "contents is required",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server.uri()));
    let err = client.generate("hi").await.expect_err("should fail");

    match err {
        AssistantError::Api { status, message } => {
            assert_eq!(status, "INVALID_ARGUMENT");
            assert_eq!(message, "contents is required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_maps_rate_limiting() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server.uri()));
    let err = client.generate("hi").await.expect_err("should fail");

    assert!(matches!(err, AssistantError::RateLimited(7)));
}

#[tokio::test]
async fn generate_maps_forbidden_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 403, "message": "denied", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server.uri()));
    let err = client.generate("hi").await.expect_err("should fail");

    assert!(matches!(err, AssistantError::Unauthorized(_)));
}

#[tokio::test]
async fn generate_without_candidates_is_empty_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&config(&server.uri()));
    let err = client.generate("hi").await.expect_err("should fail");

    assert!(matches!(err, AssistantError::Empty));
}
