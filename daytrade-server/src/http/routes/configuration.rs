//! Risk/fee settings endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::SuccessResponse;
use crate::db::repos::{ConfigurationRepo, ConfigurationUpsert};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;

/// GET /api/configuracao/{user_id} - the row, or `{}` when none was saved
async fn get_configuration(
    State(state): State<Arc<AppState>>,
    PathId(user_id): PathId,
) -> Result<Json<Value>, ApiError> {
    let config = ConfigurationRepo::new(&state.pool)
        .get_for_user(user_id)
        .await?;

    let body = match config {
        Some(config) => serde_json::to_value(config).map_err(|e| ApiError::Internal {
            message: format!("failed to serialize configuration: {}", e),
        })?,
        None => json!({}),
    };
    Ok(Json(body))
}

/// POST /api/configuracao - replace all settings for the user
async fn save_configuration(
    State(state): State<Arc<AppState>>,
    JsonBody(config): JsonBody<ConfigurationUpsert>,
) -> Result<Json<SuccessResponse>, ApiError> {
    ConfigurationRepo::new(&state.pool).upsert(&config).await?;
    tracing::debug!(user_id = config.user_id, "Configuration saved");
    Ok(Json(SuccessResponse::ok()))
}

/// Configuration routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/configuracao", post(save_configuration))
        .route("/api/configuracao/{user_id}", get(get_configuration))
}
