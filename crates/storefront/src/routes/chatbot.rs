//! Chatbot route handlers.
//!
//! The chat endpoints are open to guests; identified shoppers get their cart
//! woven into the assistant context. The caller's identity always comes from
//! the verified bearer token - a client-supplied `userId` field is accepted
//! in request bodies for compatibility but never trusted.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use hemline_core::ProductId;
use rust_decimal::Decimal;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::services::chat::{ChatError, ChatService, FALLBACK_REPLY};
use crate::services::context::ContextSummary;
use crate::services::search;
use crate::state::AppState;

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Database(e) => Self::Database(e),
            ChatError::Assistant { source, .. } => Self::Assistant(source),
            ChatError::EmptyMessage => Self::BadRequest("Message is required".to_string()),
        }
    }
}

/// Chat request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub context: ContextSummary,
}

/// Suggestions response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// Search request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsRequest {
    pub query: String,
}

/// A single search hit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub in_stock: bool,
    pub stock: i32,
}

/// Search response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProductsResponse {
    pub products: Vec<SearchHit>,
}

/// Relay a shopper message to the assistant.
///
/// POST /api/chatbot/chat
///
/// An empty message is a 400 and never reaches the upstream. An upstream
/// failure is logged as such but answered with the fixed fallback reply, so
/// the widget keeps working while the failure is still visible in telemetry.
#[instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    OptionalAuth(user_id): OptionalAuth,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let service = ChatService::new(state.pool(), state.gemini(), state.config().chat);

    match service.chat(user_id, &request.message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            message: reply.message,
            context: reply.context,
        })),
        Err(ChatError::Assistant { source, context }) => {
            sentry::capture_error(&source);
            tracing::error!(error = %source, "assistant call failed, returning fallback reply");

            Ok(Json(ChatResponse {
                message: FALLBACK_REPLY.to_string(),
                context,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// Starter questions for the chat widget.
///
/// GET /api/chatbot/suggestions
///
/// Never fails the widget: storage errors degrade to a single generic
/// suggestion.
#[instrument(skip(state))]
pub async fn suggestions(
    State(state): State<AppState>,
    OptionalAuth(user_id): OptionalAuth,
) -> Json<SuggestionsResponse> {
    let service = ChatService::new(state.pool(), state.gemini(), state.config().chat);

    let suggestions = match service.suggestions(user_id).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            tracing::warn!(error = %err, "failed to build suggestions");
            vec!["How can I help you today?".to_string()]
        }
    };

    Json(SuggestionsResponse { suggestions })
}

/// Quick catalog search for the chat widget.
///
/// POST /api/chatbot/search-products
#[instrument(skip(state, request))]
pub async fn search_products(
    State(state): State<AppState>,
    Json(request): Json<SearchProductsRequest>,
) -> Result<Json<SearchProductsResponse>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query is required".to_string()));
    }

    let catalog = ProductRepository::new(state.pool()).list().await?;

    let products = search::search(&catalog, query)
        .into_iter()
        .map(|p| SearchHit {
            id: p.id,
            name: p.name.clone(),
            price: p.price,
            category: p.category.clone(),
            in_stock: p.in_stock(),
            stock: p.stock,
        })
        .collect();

    Ok(Json(SearchProductsResponse { products }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepositoryError;
    use crate::models::product::Product;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::Utc;

    #[test]
    fn test_empty_message_maps_to_bad_request() {
        let err: AppError = ChatError::EmptyMessage.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_through() {
        let err: AppError = ChatError::Database(RepositoryError::NotFound).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_search_hit_marks_sold_out_products() {
        let product = Product {
            id: ProductId::new(7),
            name: "Leather Ankle Boots".to_string(),
            price: Decimal::new(12999, 2),
            stock: 0,
            category: Some("Shoes".to_string()),
            description: String::new(),
            image: String::new(),
            sizes: vec![],
            colors: vec![],
            created_at: Utc::now(),
        };

        let catalog = vec![product];
        let hits: Vec<SearchHit> = search::search(&catalog, "boots")
            .into_iter()
            .map(|p| SearchHit {
                id: p.id,
                name: p.name.clone(),
                price: p.price,
                category: p.category.clone(),
                in_stock: p.in_stock(),
                stock: p.stock,
            })
            .collect();

        assert_eq!(hits.len(), 1);
        let hit = hits.first().expect("hit");
        assert!(!hit.in_stock);
        assert_eq!(hit.stock, 0);
    }
}
