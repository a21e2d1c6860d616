//! Auth route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{Result, set_sentry_user};
use crate::middleware::RequireAuth;
use crate::models::user::{ProfileUpdate, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a freshly minted bearer token and the user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response for a profile update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub user: User,
}

/// Create an account.
///
/// POST /api/auth/register
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let config = state.config();
    let service = AuthService::new(state.pool(), &config.token_secret, config.token_ttl_hours);

    let (user, token) = service
        .register(&request.name, &request.email, &request.password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(AuthResponse { token, user }))
}

/// Login with email and password.
///
/// POST /api/auth/login
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let config = state.config();
    let service = AuthService::new(state.pool(), &config.token_secret, config.token_ttl_hours);

    let (user, token) = service.login(&request.email, &request.password).await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(AuthResponse { token, user }))
}

/// Get the current user.
///
/// GET /api/auth/user
#[instrument(skip(state))]
pub async fn user(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<User>> {
    let config = state.config();
    let service = AuthService::new(state.pool(), &config.token_secret, config.token_ttl_hours);

    let user = service.current_user(user_id).await?;
    Ok(Json(user))
}

/// Apply a partial profile update.
///
/// PUT /api/auth/update-profile
#[instrument(skip(state, update))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UpdateProfileResponse>> {
    let user = UserRepository::new(state.pool())
        .update_profile(user_id, &update)
        .await?;

    Ok(Json(UpdateProfileResponse { user }))
}
