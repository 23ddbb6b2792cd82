//! Login and registration endpoints
//!
//! No session is issued; clients keep the returned user id and pass it
//! on later requests.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{UserRepo, UserSummary};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{Password, Username};
use crate::password::{hash_password, verify_login};

/// Login/register request body
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(alias = "handle")]
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login/register response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserSummary,
}

/// POST /api/login
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Input that can never match a row is just a failed login
    let username = Username::new(req.username.as_deref().unwrap_or_default())
        .map_err(|_| ApiError::Unauthorized)?;
    let password = Password::new(req.password.as_deref().unwrap_or_default())
        .map_err(|_| ApiError::Unauthorized)?;

    let user = UserRepo::new(&state.pool)
        .find_credentials(&username)
        .await?;

    // Unknown users still pay for one verify
    let stored = user.as_ref().map(|u| u.password.clone());
    let verify = move || verify_login(&password, stored.as_deref());
    let matches = tokio::task::spawn_blocking(verify).await??;

    let Some(user) = user.filter(|_| matches) else {
        tracing::debug!(username = %username.as_str(), "Login rejected");
        return Err(ApiError::Unauthorized);
    };

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(AuthResponse {
        success: true,
        user: user.into(),
    }))
}

/// POST /api/register
async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = Username::new(req.username.as_deref().unwrap_or_default())?;
    let password = Password::new_for_registration(req.password.as_deref().unwrap_or_default())?;

    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    let user = UserRepo::new(&state.pool).create(&username, &hash).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(Json(AuthResponse { success: true, user }))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
}
