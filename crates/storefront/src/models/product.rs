//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hemline_core::ProductId;

/// A catalog product.
///
/// Immutable except via the administrative create endpoint and seeding.
/// `stock` is informational only - cart and checkout operations never
/// decrement it (no reservation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in ringgit (non-negative).
    pub price: Decimal,
    /// Units on hand (non-negative).
    pub stock: i32,
    /// Optional category label (e.g., "T-Shirts").
    pub category: Option<String>,
    /// Long-form description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Available colors.
    pub colors: Vec<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl NewProduct {
    /// Validate invariants the schema cannot express on its own.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when the name is blank, the price is
    /// negative, or the stock is negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product name is required".to_string());
        }
        if self.price.is_sign_negative() {
            return Err("price must be non-negative".to_string());
        }
        if self.stock < 0 {
            return Err("stock must be non-negative".to_string());
        }
        Ok(())
    }
}
