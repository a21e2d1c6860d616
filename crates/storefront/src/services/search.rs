//! Product search used by the assistant's quick-search endpoint.
//!
//! Case-insensitive substring match over name, description, and category.
//! Results keep stored catalog order (no ranking) and are capped at
//! [`MAX_RESULTS`].

use crate::models::product::Product;

/// Maximum number of results returned by a search.
pub const MAX_RESULTS: usize = 5;

/// Whether a product matches a query.
///
/// The match is a case-insensitive substring test against the name,
/// description, and category.
#[must_use]
pub fn matches(product: &Product, query: &str) -> bool {
    let query = query.to_lowercase();

    product.name.to_lowercase().contains(&query)
        || product.description.to_lowercase().contains(&query)
        || product
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&query))
}

/// Search the catalog, returning at most [`MAX_RESULTS`] matches in stored
/// order.
#[must_use]
pub fn search<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    catalog
        .iter()
        .filter(|p| matches(p, query))
        .take(MAX_RESULTS)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hemline_core::ProductId;
    use rust_decimal::Decimal;

    fn product(id: i32, name: &str, description: &str, category: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(4999, 2),
            stock: 5,
            category: category.map(ToString::to_string),
            description: description.to_string(),
            image: String::new(),
            sizes: vec![],
            colors: vec![],
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Classic White T-Shirt", "Cotton tee", Some("T-Shirts")),
            product(2, "Vintage Denim Jacket", "Classic denim", Some("Jackets")),
            product(3, "Slim Fit Chinos", "Versatile chino pants", Some("Pants")),
            product(4, "Striped Long Sleeve Tee", "Soft cotton", Some("T-Shirts")),
        ]
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let catalog = catalog();
        let results = search(&catalog, "DENIM");
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "Vintage Denim Jacket");
    }

    #[test]
    fn test_matches_description_and_category() {
        let catalog = catalog();
        // "chino" only appears in a description
        assert_eq!(search(&catalog, "chino").len(), 1);
        // "t-shirts" matches the category of two products
        assert_eq!(search(&catalog, "t-shirts").len(), 2);
    }

    #[test]
    fn test_results_keep_stored_order() {
        let catalog = catalog();
        let results = search(&catalog, "cotton");
        let ids: Vec<i32> = results.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_results_capped_at_five() {
        let catalog: Vec<Product> = (1..=8)
            .map(|i| product(i, &format!("Basic Tee {i}"), "", None))
            .collect();
        assert_eq!(search(&catalog, "tee").len(), MAX_RESULTS);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = catalog();
        assert!(search(&catalog, "snowboard").is_empty());
    }
}
