//! Authentication extractors.
//!
//! The bearer credential travels explicitly on every request in the
//! `Authorization` header; these extractors verify it against the configured
//! signing secret. There is no ambient or process-global auth state.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use hemline_core::UserId;

use crate::error::AppError;
use crate::services::auth::verify_token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Rejects the request with 401 when the header is missing or the token is
/// invalid or expired.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user_id): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, user {user_id}!")
/// }
/// ```
pub struct RequireAuth(pub UserId);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing credential".to_string()))?;

        let user_id =
            verify_token(token, &app.config().token_secret).map_err(AppError::Auth)?;

        Ok(Self(user_id))
    }
}

/// Extractor that optionally identifies the caller.
///
/// Unlike `RequireAuth`, this never rejects: a missing or invalid token
/// simply yields an anonymous caller. Used by the chat endpoints, which are
/// open to guests but personalize for identified shoppers.
pub struct OptionalAuth(pub Option<UserId>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let user_id = bearer_token(&parts.headers)
            .and_then(|token| verify_token(token, &app.config().token_secret).ok());

        Ok(Self(user_id))
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
