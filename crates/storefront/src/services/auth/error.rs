//! Error types for the authentication service.

use thiserror::Error;

use hemline_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password fails the minimum requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Bearer token is missing, malformed, expired, or has a bad signature.
    #[error("invalid token")]
    InvalidToken,

    /// Token could not be minted.
    #[error("token issuance failed: {0}")]
    TokenIssuance(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
