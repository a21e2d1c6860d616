//! Product repository for database operations.

use sqlx::PgPool;

use hemline_core::ProductId;

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

const PRODUCT_COLUMNS: &str =
    "id, name, price, stock, category, description, image, sizes, colors, created_at";

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog in stored (insertion) order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a new product and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price, stock, category, description, image, sizes, colors)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.price)
        .bind(new.stock)
        .bind(&new.category)
        .bind(&new.description)
        .bind(&new.image)
        .bind(&new.sizes)
        .bind(&new.colors)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }
}
