//! Seed the catalog with the standard clothing lineup.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

use hemline_storefront::db::{self, ProductRepository};
use hemline_storefront::models::product::NewProduct;

/// Build a seed product. Prices are given in sen to avoid float literals.
fn item(
    name: &str,
    price_sen: i64,
    stock: i32,
    category: &str,
    description: &str,
    image: &str,
    sizes: &[&str],
    colors: &[&str],
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Decimal::new(price_sen, 2),
        stock,
        category: Some(category.to_string()),
        description: description.to_string(),
        image: image.to_string(),
        sizes: sizes.iter().map(ToString::to_string).collect(),
        colors: colors.iter().map(ToString::to_string).collect(),
    }
}

/// The standard clothing lineup.
fn clothing_products() -> Vec<NewProduct> {
    vec![
        item(
            "Classic White T-Shirt",
            2999,
            25,
            "T-Shirts",
            "Comfortable cotton t-shirt perfect for everyday wear. Made from 100% organic cotton.",
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["White", "Black", "Gray"],
        ),
        item(
            "Vintage Denim Jacket",
            8999,
            12,
            "Jackets",
            "Classic denim jacket with a vintage wash. Perfect for layering and casual outfits.",
            "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=400&h=400&fit=crop&crop=center",
            &["S", "M", "L", "XL"],
            &["Blue", "Light Blue", "Dark Blue"],
        ),
        item(
            "Slim Fit Chinos",
            5999,
            18,
            "Pants",
            "Versatile chino pants with a modern slim fit. Great for both casual and semi-formal occasions.",
            "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=400&h=400&fit=crop&crop=center",
            &["28", "30", "32", "34", "36"],
            &["Khaki", "Navy", "Black", "Olive"],
        ),
        item(
            "Cozy Knit Sweater",
            7999,
            10,
            "Sweaters",
            "Soft wool blend sweater perfect for cooler weather. Features a classic crew neck design.",
            "https://images.unsplash.com/photo-1434389677669-e08b4cac3105?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["Cream", "Gray", "Navy", "Burgundy"],
        ),
        item(
            "Casual Button-Up Shirt",
            4999,
            20,
            "Shirts",
            "Lightweight cotton shirt perfect for layering or wearing on its own. Features a relaxed fit.",
            "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=400&h=400&fit=crop&crop=center",
            &["S", "M", "L", "XL", "XXL"],
            &["White", "Light Blue", "Pink", "Mint"],
        ),
        item(
            "Athletic Joggers",
            4599,
            30,
            "Activewear",
            "Comfortable joggers made from moisture-wicking fabric. Perfect for workouts or lounging.",
            "https://images.unsplash.com/photo-1506629905542-b5842f25cd6b?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["Black", "Gray", "Navy", "Charcoal"],
        ),
        item(
            "Floral Summer Dress",
            6999,
            8,
            "Dresses",
            "Light and airy summer dress with a beautiful floral print. Perfect for warm weather occasions.",
            "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["Pink", "Blue", "Yellow", "White"],
        ),
        item(
            "Leather Ankle Boots",
            12999,
            6,
            "Shoes",
            "Stylish ankle boots made from genuine leather. Features a comfortable low heel and versatile design.",
            "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=400&h=400&fit=crop&crop=center",
            &["6", "7", "8", "9", "10", "11"],
            &["Black", "Brown", "Tan"],
        ),
        item(
            "Hooded Sweatshirt",
            5599,
            22,
            "Hoodies",
            "Comfortable pullover hoodie made from soft cotton blend. Features a kangaroo pocket and adjustable hood.",
            "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL", "XXL"],
            &["Gray", "Black", "Navy", "Maroon"],
        ),
        item(
            "High-Waisted Jeans",
            7999,
            15,
            "Jeans",
            "Classic high-waisted jeans with a flattering fit. Made from premium denim with slight stretch.",
            "https://images.unsplash.com/photo-1582418702059-97ebafb35d09?w=400&h=400&fit=crop&crop=center",
            &["24", "26", "28", "30", "32", "34"],
            &["Dark Blue", "Medium Blue", "Light Blue", "Black"],
        ),
        item(
            "Striped Long Sleeve Tee",
            3499,
            16,
            "T-Shirts",
            "Classic striped long sleeve t-shirt made from soft cotton. Perfect for layering or wearing alone.",
            "https://images.unsplash.com/photo-1586790170083-2f9ceadc732d?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["Black/White", "Navy/White", "Red/White"],
        ),
        item(
            "Blazer Jacket",
            11999,
            9,
            "Blazers",
            "Tailored blazer perfect for professional or semi-formal occasions. Features a modern fit and quality construction.",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=center",
            &["XS", "S", "M", "L", "XL"],
            &["Black", "Navy", "Gray", "Charcoal"],
        ),
    ]
}

/// Seed the catalog.
///
/// # Arguments
///
/// * `clear_existing` - If true, delete all existing products first
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn products(clear_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    if clear_existing {
        sqlx::query("DELETE FROM products").execute(&pool).await?;
        info!("Cleared existing products");
    }

    let repo = ProductRepository::new(&pool);
    let lineup = clothing_products();
    let count = lineup.len();

    for new in &lineup {
        let product = repo.create(new).await?;
        info!(
            "  seeded {} ({}) at RM{:.2}",
            product.name,
            product.category.as_deref().unwrap_or("uncategorized"),
            product.price
        );
    }

    info!("Seeding complete! {count} products inserted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lineup_is_complete_and_valid() {
        let lineup = clothing_products();
        assert_eq!(lineup.len(), 12);
        for product in &lineup {
            assert!(product.validate().is_ok(), "invalid seed: {}", product.name);
            assert!(product.stock > 0);
            assert!(!product.sizes.is_empty());
            assert!(!product.colors.is_empty());
        }
    }
}
