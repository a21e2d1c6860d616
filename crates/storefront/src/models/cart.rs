//! Cart domain types and line-item mutation semantics.
//!
//! A cart is a single document owned by one user: a list of
//! (product, quantity) line items persisted as one JSONB row. The mutation
//! rules live here as pure methods so they can be exercised without a
//! database:
//!
//! - at most one line per product
//! - quantities are strictly positive; a line reaching zero or negative
//!   quantity is removed, never stored
//! - totals are recomputed from the catalog on every hydration, never cached

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hemline_core::{ProductId, UserId};

use super::product::Product;

/// One (product, quantity) pair within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A user's cart document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Owning user.
    pub user_id: UserId,
    /// Line items, keyed by product identity (at most one line per product).
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart for a user.
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
        }
    }

    /// Find the line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line is incremented; otherwise a new line is appended.
    /// If the resulting quantity is not positive the line is removed, so the
    /// cart never stores a zero or negative line.
    pub fn add(&mut self, product_id: ProductId, quantity: i64) {
        let current = self.line(product_id).map_or(0, |l| i64::from(l.quantity));
        self.apply_quantity(product_id, current + quantity);
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A target of zero or less removes the line instead of storing a
    /// non-positive value. Returns `false` if no line existed for the product.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if self.line(product_id).is_none() {
            return false;
        }
        self.apply_quantity(product_id, quantity);
        true
    }

    /// Remove the line for a product. Removing an absent line is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empty the line list (the cart itself is retained).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Store `quantity` for a product, enforcing the positive-quantity
    /// invariant.
    fn apply_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => self.lines.push(CartLine {
                product_id,
                quantity,
            }),
        }
    }

    /// Join line items against the catalog.
    ///
    /// Lines whose product no longer exists are dropped from the view.
    /// The total is recomputed fresh on every call.
    #[must_use]
    pub fn hydrate(&self, catalog: &[Product]) -> HydratedCart {
        let lines: Vec<HydratedLine> = self
            .lines
            .iter()
            .filter_map(|line| {
                catalog
                    .iter()
                    .find(|p| p.id == line.product_id)
                    .map(|product| HydratedLine {
                        product: product.clone(),
                        quantity: line.quantity,
                        line_total: product.price * Decimal::from(line.quantity),
                    })
            })
            .collect();

        let total = lines.iter().map(|l| l.line_total).sum();

        HydratedCart { lines, total }
    }
}

/// A cart line joined with its product details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedLine {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// A cart with product details joined in and totals computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedCart {
    /// Serialized as `items` - the name the web client reads.
    #[serde(rename = "items")]
    pub lines: Vec<HydratedLine>,
    pub total: Decimal,
}

impl HydratedCart {
    /// The view of a user with no cart yet.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}
