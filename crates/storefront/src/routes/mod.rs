//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check (in main.rs)
//! GET  /health/ready            - Readiness check (in main.rs)
//!
//! # Products
//! GET  /api/products            - Full catalog
//! POST /api/products            - Create product (administrative)
//!
//! # Cart (requires auth)
//! GET    /api/cart              - Hydrated cart with totals
//! POST   /api/cart/add          - Add item (creates cart on first use)
//! POST   /api/cart/update       - Set line quantity (<= 0 removes)
//! POST   /api/cart/remove       - Remove line
//! DELETE /api/cart/clear        - Empty the cart
//!
//! # Auth
//! POST /api/auth/register       - Create account, returns bearer token
//! POST /api/auth/login          - Login, returns bearer token
//! GET  /api/auth/user           - Current user (requires auth)
//! PUT  /api/auth/update-profile - Partial profile update (requires auth)
//!
//! # Chatbot
//! POST /api/chatbot/chat            - Relay a message to the assistant
//! GET  /api/chatbot/suggestions     - Starter questions
//! POST /api/chatbot/search-products - Quick catalog search
//! ```

pub mod auth;
pub mod cart;
pub mod chatbot;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::index).post(products::create))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", delete(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/user", get(auth::user))
        .route("/update-profile", put(auth::update_profile))
}

/// Create the chatbot routes router.
pub fn chatbot_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chatbot::chat))
        .route("/suggestions", get(chatbot::suggestions))
        .route("/search-products", post(chatbot::search_products))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/chatbot", chatbot_routes())
}
