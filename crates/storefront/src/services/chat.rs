//! Chat relay service.
//!
//! Validates the shopper's message, assembles the store context, sends the
//! rendered prompt upstream, and relays the reply text verbatim. Upstream
//! failures stay typed so the route can log them distinctly before falling
//! back to the fixed apology the shopper sees.

use sqlx::PgPool;
use tracing::instrument;

use hemline_core::UserId;

use crate::config::ChatConfig;
use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::gemini::{AssistantError, GeminiClient};
use crate::models::cart::HydratedCart;

use super::context::{ContextSummary, StoreContext};

/// Reply shown when the upstream assistant call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I am experiencing technical difficulties. Please try again later.";

/// Maximum number of suggestions returned to the client.
const MAX_SUGGESTIONS: usize = 6;

/// Errors that can occur in the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Upstream assistant call failed.
    ///
    /// Carries the context summary assembled before the call so the route
    /// can still answer truthfully alongside the fallback reply.
    #[error("assistant error: {source}")]
    Assistant {
        #[source]
        source: AssistantError,
        context: ContextSummary,
    },

    /// The message was empty or whitespace.
    #[error("message is required")]
    EmptyMessage,
}

/// A relayed assistant reply plus the context summary echoed to the client.
#[derive(Debug)]
pub struct ChatReply {
    pub message: String,
    pub context: ContextSummary,
}

/// Chat relay service.
pub struct ChatService<'a> {
    pool: &'a PgPool,
    gemini: &'a GeminiClient,
    config: ChatConfig,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, gemini: &'a GeminiClient, config: ChatConfig) -> Self {
        Self {
            pool,
            gemini,
            config,
        }
    }

    /// Relay a shopper message to the assistant.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for a blank message (checked before
    /// any database or upstream work), `ChatError::Assistant` when the
    /// upstream call fails, and `ChatError::Database` on storage errors.
    #[instrument(skip(self, message), fields(user = ?user_id))]
    pub async fn chat(
        &self,
        user_id: Option<UserId>,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let context = self.store_context(user_id, message).await?;
        let prompt = context.render_prompt(message);

        match self.gemini.generate(&prompt).await {
            Ok(reply) => Ok(ChatReply {
                message: reply,
                context: context.summary(),
            }),
            Err(source) => Err(ChatError::Assistant {
                source,
                context: context.summary(),
            }),
        }
    }

    /// Suggested starter questions for the chat widget.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Database` on storage errors.
    #[instrument(skip(self), fields(user = ?user_id))]
    pub async fn suggestions(&self, user_id: Option<UserId>) -> Result<Vec<String>, ChatError> {
        let context = self.store_context(user_id, "").await?;
        Ok(build_suggestions(&context))
    }

    /// Assemble the store context for a request.
    async fn store_context(
        &self,
        user_id: Option<UserId>,
        message: &str,
    ) -> Result<StoreContext, ChatError> {
        let catalog = ProductRepository::new(self.pool).list().await?;

        let cart = match user_id {
            Some(user_id) => Some(
                CartRepository::new(self.pool)
                    .get_by_user(user_id)
                    .await?
                    .map_or_else(HydratedCart::empty, |cart| cart.hydrate(&catalog)),
            ),
            None => None,
        };

        Ok(StoreContext::assemble(
            &catalog,
            cart.as_ref(),
            message,
            self.config.max_context_products,
        ))
    }
}

/// Compose the suggestion list for a context snapshot.
///
/// Cart-bearing users get cart questions first; a category-specific
/// suggestion is appended when the store has categories; capped at
/// [`MAX_SUGGESTIONS`].
fn build_suggestions(context: &StoreContext) -> Vec<String> {
    let mut suggestions = vec![
        "What products do you have available?".to_string(),
        "Can you recommend something popular?".to_string(),
        "What are your product categories?".to_string(),
        "Do you offer free shipping?".to_string(),
    ];

    if context.has_cart_items() {
        suggestions.splice(
            0..0,
            [
                "What's in my cart?".to_string(),
                "How much is my total?".to_string(),
                "Do I qualify for free shipping?".to_string(),
            ],
        );
    }

    if let Some(category) = context.categories.first() {
        suggestions.push(format!("Show me {category} products"));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
