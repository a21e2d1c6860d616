//! Business logic services for the storefront.

pub mod auth;
pub mod cart;
pub mod chat;
pub mod context;
pub mod search;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use chat::{ChatError, ChatService, FALLBACK_REPLY};
pub use context::StoreContext;
