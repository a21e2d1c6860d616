//! Cart service.
//!
//! Orchestrates cart operations: load the user's cart document, apply the
//! mutation in memory (see [`crate::models::cart::Cart`]), write the document
//! back, and return the hydrated view with totals recomputed against the
//! current catalog. One read-modify-write per operation; the atomic row
//! update in [`CartRepository::save`] is the only consistency mechanism.

use sqlx::PgPool;
use tracing::instrument;

use hemline_core::{ProductId, UserId};

use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::models::cart::{Cart, HydratedCart};

/// Errors that can occur in the cart service.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The user has no cart yet.
    #[error("cart not found")]
    CartNotFound,

    /// The cart has no line for the referenced product.
    #[error("item not found in cart")]
    LineNotFound,
}

/// Cart service.
pub struct CartService<'a> {
    pool: &'a PgPool,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's hydrated cart.
    ///
    /// A user with no cart yet gets an empty view (not an error).
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get(&self, user_id: UserId) -> Result<HydratedCart, CartError> {
        let Some(cart) = CartRepository::new(self.pool).get_by_user(user_id).await? else {
            return Ok(HydratedCart::empty());
        };

        self.hydrate(&cart).await
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// Creates the cart on first use. An existing line is incremented.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product does not exist.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<HydratedCart, CartError> {
        let products = ProductRepository::new(self.pool);
        if products.get(product_id).await?.is_none() {
            return Err(CartError::ProductNotFound);
        }

        let carts = CartRepository::new(self.pool);
        let mut cart = carts
            .get_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(user_id));

        cart.add(product_id, quantity);
        carts.save(&cart).await?;

        self.hydrate(&cart).await
    }

    /// Remove the line for a product from the user's cart.
    ///
    /// Removing an absent line from an existing cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart yet.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<HydratedCart, CartError> {
        let carts = CartRepository::new(self.pool);
        let mut cart = carts
            .get_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        cart.remove(product_id);
        carts.save(&cart).await?;

        self.hydrate(&cart).await
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A target of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart yet, or
    /// `CartError::LineNotFound` if the cart has no line for the product.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn update(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<HydratedCart, CartError> {
        let carts = CartRepository::new(self.pool);
        let mut cart = carts
            .get_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        if !cart.set_quantity(product_id, quantity) {
            return Err(CartError::LineNotFound);
        }
        carts.save(&cart).await?;

        self.hydrate(&cart).await
    }

    /// Empty the user's cart (the cart row is retained, not deleted).
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart yet.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn clear(&self, user_id: UserId) -> Result<HydratedCart, CartError> {
        let carts = CartRepository::new(self.pool);
        let mut cart = carts
            .get_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        cart.clear();
        carts.save(&cart).await?;

        Ok(HydratedCart::empty())
    }

    /// Join a cart against the current catalog, recomputing totals fresh.
    async fn hydrate(&self, cart: &Cart) -> Result<HydratedCart, CartError> {
        let catalog = ProductRepository::new(self.pool).list().await?;
        Ok(cart.hydrate(&catalog))
    }
}
