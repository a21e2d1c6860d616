//! Cart repository for database operations.
//!
//! Carts are stored document-style: one row per user with the line items in
//! a JSONB column. Every mutation loads the document, applies the change in
//! memory (see [`crate::models::cart::Cart`]), and writes the whole document
//! back in a single atomic row update.

use sqlx::PgPool;
use sqlx::types::Json;

use hemline_core::UserId;

use super::RepositoryError;
use crate::models::cart::{Cart, CartLine};

/// Row shape for the `carts` table.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    user_id: i32,
    items: Json<Vec<CartLine>>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            lines: row.items.0,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a user's cart document, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            "SELECT user_id, items FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    /// Write a cart document back, creating the row on first save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO carts (user_id, items)
             VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET items = EXCLUDED.items, updated_at = now()",
        )
        .bind(cart.user_id)
        .bind(Json(&cart.lines))
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
