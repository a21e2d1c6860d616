//! Authentication service.
//!
//! Provides password registration/login and bearer-token minting. Tokens are
//! HS256 JWTs carrying the user ID; they are passed explicitly on every
//! request in the `Authorization` header - there is no process-wide auth
//! state anywhere in the server.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use hemline_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// JWT claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID the token was minted for.
    pub sub: i32,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issued-at as a unix timestamp.
    pub iat: i64,
}

/// Authentication service.
///
/// Handles user registration, login, and bearer-token verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    token_secret: &'a SecretString,
    token_ttl_hours: i64,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        token_secret: &'a SecretString,
        token_ttl_hours: i64,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            token_secret,
            token_ttl_hours,
        }
    }

    /// Register a new user with name, email, and password.
    ///
    /// Returns the created user and a freshly minted bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        validate_password(password)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let user = self
            .users
            .create(name.trim(), &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = issue_token(user.id, self.token_secret, self.token_ttl_hours)?;

        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// Returns the user and a freshly minted bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        // Get user with password hash
        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        verify_password(password, &password_hash)?;

        let token = issue_token(user.id, self.token_secret, self.token_ttl_hours)?;

        Ok((user, token))
    }

    /// Look up the user a verified token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the user behind the token no
    /// longer exists.
    pub async fn current_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

// =============================================================================
// Password Helpers
// =============================================================================

/// Validate that a password meets the minimum requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2id and a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

// =============================================================================
// Token Helpers
// =============================================================================

/// Mint a bearer token for a user.
///
/// # Errors
///
/// Returns `AuthError::TokenIssuance` if encoding fails.
pub fn issue_token(
    user_id: UserId,
    secret: &SecretString,
    ttl_hours: i64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.as_i32(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
        iat: now.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AuthError::TokenIssuance(e.to_string()))
}

/// Verify a bearer token and return the user ID it was minted for.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for any malformed, tampered, or expired
/// token.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<UserId, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(UserId::new(data.claims.sub))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kJ8#mN2$pQ5^rT9&vW3*xZ6!aC4@eF7%")
    }

    #[test]
    fn test_validate_password_too_short() {
        let result = validate_password("short");
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password_fails() {
        let hash = hash_password("correct horse battery").unwrap();
        let result = verify_password("wrong password", &hash);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token(UserId::new(42), &secret(), 1).unwrap();
        let user_id = verify_token(&token, &secret()).unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue_token(UserId::new(42), &secret(), 1).unwrap();
        let tampered = format!("{token}x");
        assert!(matches!(
            verify_token(&tampered, &secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_with_wrong_secret_rejected() {
        let token = issue_token(UserId::new(42), &secret(), 1).unwrap();
        let other = SecretString::from("zY1!bX4$dV7^fT0&hR3*jP6@lN9#nM2%");
        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative TTL puts the expiry in the past.
        let token = issue_token(UserId::new(42), &secret(), -2).unwrap();
        assert!(matches!(
            verify_token(&token, &secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt", &secret()),
            Err(AuthError::InvalidToken)
        ));
    }
}
