//! Assistant context assembly.
//!
//! On each chat request the storefront reads the catalog and the caller's
//! cart and renders them into the text block the language model sees. The
//! output is deterministic for a given catalog/cart snapshot.
//!
//! The catalog section is bounded: when the catalog exceeds the configured
//! maximum, products matching the user's message are preferred and the
//! remaining slots are filled in stored order.

use rust_decimal::Decimal;
use serde::Serialize;

use hemline_core::{CurrencyCode, Price};

use crate::models::cart::HydratedCart;
use crate::models::product::Product;

use super::search;

/// Format an amount the way the store quotes prices (e.g., "RM29.99").
fn ringgit(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::MYR).display()
}

/// A catalog fact included in the assistant prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFact {
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub stock: i32,
}

impl ProductFact {
    /// Whether at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A cart fact included in the assistant prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CartFact {
    pub product: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

/// Everything the assistant prompt needs about the store, frozen at request
/// time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreContext {
    /// Bounded product facts (see module docs).
    pub products: Vec<ProductFact>,
    /// The caller's cart lines, if they are identified.
    pub cart_lines: Vec<CartFact>,
    /// Sum of line totals, recomputed fresh for this snapshot.
    pub cart_total: Decimal,
    /// Distinct categories across the full catalog, in first-seen order.
    pub categories: Vec<String>,
    /// Full catalog size (before bounding).
    pub total_products: usize,
    /// Whether the request carried a verified user identity.
    pub user_known: bool,
}

/// Summary of the context echoed back to the client alongside the reply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub has_products: bool,
    pub has_cart_items: bool,
    pub cart_total: Decimal,
}

impl StoreContext {
    /// Assemble the context from a catalog/cart snapshot.
    ///
    /// `cart` is `None` for anonymous callers; an identified user with no
    /// cart passes an empty [`HydratedCart`]. `message` steers which products
    /// survive bounding when the catalog exceeds `max_products`.
    #[must_use]
    pub fn assemble(
        catalog: &[Product],
        cart: Option<&HydratedCart>,
        message: &str,
        max_products: usize,
    ) -> Self {
        let products = select_products(catalog, message, max_products)
            .into_iter()
            .map(|p| ProductFact {
                name: p.name.clone(),
                price: p.price,
                category: p.category.clone(),
                stock: p.stock,
            })
            .collect();

        let mut categories: Vec<String> = Vec::new();
        for product in catalog {
            if let Some(category) = &product.category
                && !categories.contains(category)
            {
                categories.push(category.clone());
            }
        }

        let cart_lines: Vec<CartFact> = cart.map_or_else(Vec::new, |c| {
            c.lines
                .iter()
                .map(|l| CartFact {
                    product: l.product.name.clone(),
                    quantity: l.quantity,
                    price: l.product.price,
                    total: l.line_total,
                })
                .collect()
        });

        let cart_total = cart.map_or(Decimal::ZERO, |c| c.total);

        Self {
            products,
            cart_lines,
            cart_total,
            categories,
            total_products: catalog.len(),
            user_known: cart.is_some(),
        }
    }

    /// Whether the store has any products at all.
    #[must_use]
    pub const fn has_products(&self) -> bool {
        self.total_products > 0
    }

    /// Whether the caller's cart has any lines.
    #[must_use]
    pub fn has_cart_items(&self) -> bool {
        !self.cart_lines.is_empty()
    }

    /// The summary echoed back to the client.
    #[must_use]
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            has_products: self.has_products(),
            has_cart_items: self.has_cart_items(),
            cart_total: self.cart_total,
        }
    }

    /// Render the full prompt sent upstream: instructions, store facts, and
    /// the user's message.
    #[must_use]
    pub fn render_prompt(&self, message: &str) -> String {
        let mut prompt = String::from(
            "You are a helpful e-commerce assistant for an online store. \
             You have access to the following store information:\n\n",
        );

        prompt.push_str("AVAILABLE PRODUCTS:\n");
        for p in &self.products {
            let category = p.category.as_deref().unwrap_or("No category");
            let availability = if p.in_stock() {
                format!("{} in stock", p.stock)
            } else {
                "Out of stock".to_string()
            };
            prompt.push_str(&format!(
                "- {}: {} ({category}) - {availability}\n",
                p.name,
                ringgit(p.price)
            ));
        }

        prompt.push_str(&format!(
            "\nPRODUCT CATEGORIES: {}\n",
            self.categories.join(", ")
        ));

        if self.has_cart_items() {
            prompt.push_str("\nUSER'S CURRENT CART:\n");
            for line in &self.cart_lines {
                prompt.push_str(&format!(
                    "- {}x {} - {}\n",
                    line.quantity,
                    line.product,
                    ringgit(line.total)
                ));
            }
            prompt.push_str(&format!("Cart Total: {}\n", ringgit(self.cart_total)));
        } else if self.user_known {
            prompt.push_str("\nUSER'S CART: Empty\n");
        }

        prompt.push_str(
            "\nINSTRUCTIONS:\n\
             - Help users find products, answer questions about items, pricing, and availability\n\
             - Provide product recommendations based on their needs\n\
             - Help with cart-related questions and checkout guidance\n\
             - Be friendly, helpful, and concise\n\
             - If asked about products not in our store, politely explain we don't carry them and suggest alternatives\n\
             - For cart operations, guide users to use the website interface\n\
             - Always mention prices in Malaysian Ringgit (RM)\n\
             - If users ask about shipping, mention we offer free shipping for orders over RM100\n",
        );

        prompt.push_str(&format!("\nUSER MESSAGE: {message}\n"));

        prompt.push_str(
            "\nIMPORTANT: Format your response using Markdown. Use lists, bold, italics, \
             tables, and other Markdown features to make your answer visually appealing and \
             easy to read. For product lists, use bullet points or tables. For instructions, \
             use numbered lists. For totals, use bold. Do not include any code blocks unless \
             asked. Do not explain Markdown, just use it.\n\n\
             Please provide a helpful response in Markdown:",
        );

        prompt
    }
}

/// Pick which products survive into the prompt.
///
/// Small catalogs are passed through whole. Larger ones are bounded to
/// `max`: products matching the user's message first, then the remaining
/// slots filled in stored order.
fn select_products<'a>(catalog: &'a [Product], message: &str, max: usize) -> Vec<&'a Product> {
    if catalog.len() <= max {
        return catalog.iter().collect();
    }

    let mut selected: Vec<&Product> = catalog
        .iter()
        .filter(|p| search::matches(p, message))
        .take(max)
        .collect();

    if selected.len() < max {
        for product in catalog {
            if selected.len() >= max {
                break;
            }
            if !selected.iter().any(|s| s.id == product.id) {
                selected.push(product);
            }
        }
        // Keep stored order even when matched and fill products interleave.
        selected.sort_by_key(|p| p.id.as_i32());
    }

    selected
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hemline_core::ProductId;
    use rust_decimal::Decimal;

    use crate::models::cart::{HydratedCart, HydratedLine};

    fn product(id: i32, name: &str, price: &str, stock: i32, category: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: price.parse().unwrap(),
            stock,
            category: category.map(ToString::to_string),
            description: String::new(),
            image: String::new(),
            sizes: vec![],
            colors: vec![],
            created_at: Utc::now(),
        }
    }

    fn cart_with(lines: Vec<(Product, u32)>) -> HydratedCart {
        let lines: Vec<HydratedLine> = lines
            .into_iter()
            .map(|(product, quantity)| HydratedLine {
                line_total: product.price * Decimal::from(quantity),
                product,
                quantity,
            })
            .collect();
        let total = lines.iter().map(|l| l.line_total).sum();
        HydratedCart { lines, total }
    }

    #[test]
    fn test_out_of_stock_products_are_flagged() {
        let catalog = vec![
            product(1, "Tee", "29.99", 10, Some("T-Shirts")),
            product(2, "Boots", "129.99", 0, Some("Shoes")),
        ];

        let context = StoreContext::assemble(&catalog, None, "", 50);
        let prompt = context.render_prompt("what do you have?");

        assert!(prompt.contains("- Tee: RM29.99 (T-Shirts) - 10 in stock"));
        assert!(prompt.contains("- Boots: RM129.99 (Shoes) - Out of stock"));
    }

    #[test]
    fn test_category_fallback_label() {
        let catalog = vec![product(1, "Mystery Item", "5.00", 1, None)];
        let prompt = StoreContext::assemble(&catalog, None, "", 50).render_prompt("hi");
        assert!(prompt.contains("(No category)"));
    }

    #[test]
    fn test_categories_distinct_in_first_seen_order() {
        let catalog = vec![
            product(1, "A", "1", 1, Some("T-Shirts")),
            product(2, "B", "1", 1, Some("Jackets")),
            product(3, "C", "1", 1, Some("T-Shirts")),
            product(4, "D", "1", 1, None),
        ];

        let context = StoreContext::assemble(&catalog, None, "", 50);
        assert_eq!(context.categories, vec!["T-Shirts", "Jackets"]);
    }

    #[test]
    fn test_cart_block_with_totals() {
        let a = product(1, "Tee", "10", 5, None);
        let b = product(2, "Socks", "5", 5, None);
        let cart = cart_with(vec![(a.clone(), 2), (b.clone(), 1)]);
        let catalog = vec![a, b];

        let context = StoreContext::assemble(&catalog, Some(&cart), "", 50);
        let prompt = context.render_prompt("how much is my total?");

        assert!(prompt.contains("USER'S CURRENT CART:"));
        assert!(prompt.contains("- 2x Tee - RM20.00"));
        assert!(prompt.contains("- 1x Socks - RM5.00"));
        assert!(prompt.contains("Cart Total: RM25.00"));
    }

    #[test]
    fn test_known_user_empty_cart_marker() {
        let catalog = vec![product(1, "Tee", "10", 5, None)];
        let cart = HydratedCart::empty();

        let prompt = StoreContext::assemble(&catalog, Some(&cart), "", 50).render_prompt("hi");
        assert!(prompt.contains("USER'S CART: Empty"));
        assert!(!prompt.contains("USER'S CURRENT CART:"));
    }

    #[test]
    fn test_anonymous_caller_has_no_cart_section() {
        let catalog = vec![product(1, "Tee", "10", 5, None)];
        let prompt = StoreContext::assemble(&catalog, None, "", 50).render_prompt("hi");
        assert!(!prompt.contains("USER'S CART"));
        assert!(!prompt.contains("USER'S CURRENT CART"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let catalog = vec![
            product(1, "Tee", "29.99", 10, Some("T-Shirts")),
            product(2, "Boots", "129.99", 0, Some("Shoes")),
        ];

        let a = StoreContext::assemble(&catalog, None, "boots", 50).render_prompt("boots");
        let b = StoreContext::assemble(&catalog, None, "boots", 50).render_prompt("boots");
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_catalog_is_not_bounded() {
        let catalog: Vec<Product> = (1..=10)
            .map(|i| product(i, &format!("Item {i}"), "1", 1, None))
            .collect();

        let context = StoreContext::assemble(&catalog, None, "anything", 50);
        assert_eq!(context.products.len(), 10);
        assert_eq!(context.total_products, 10);
    }

    #[test]
    fn test_large_catalog_is_bounded_and_prefers_matches() {
        let mut catalog: Vec<Product> = (1..=20)
            .map(|i| product(i, &format!("Item {i}"), "1", 1, None))
            .collect();
        catalog.push(product(21, "Denim Jacket", "89.99", 3, Some("Jackets")));

        let context = StoreContext::assemble(&catalog, None, "denim", 5);
        assert_eq!(context.products.len(), 5);
        assert!(context.products.iter().any(|p| p.name == "Denim Jacket"));
        // Full catalog size is still reported.
        assert_eq!(context.total_products, 21);
    }

    #[test]
    fn test_bounded_selection_keeps_stored_order() {
        let catalog: Vec<Product> = (1..=8)
            .map(|i| product(i, &format!("Item {i}"), "1", 1, None))
            .collect();

        let context = StoreContext::assemble(&catalog, None, "no match here", 4);
        let names: Vec<&str> = context.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Item 1", "Item 2", "Item 3", "Item 4"]);
    }

    #[test]
    fn test_summary_reflects_snapshot() {
        let a = product(1, "Tee", "10", 5, None);
        let cart = cart_with(vec![(a.clone(), 2)]);
        let catalog = vec![a];

        let summary = StoreContext::assemble(&catalog, Some(&cart), "", 50).summary();
        assert!(summary.has_products);
        assert!(summary.has_cart_items);
        assert_eq!(summary.cart_total, "20".parse().unwrap());
    }
}
