//! Daily journal endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::{CreatedResponse, SuccessResponse};
use crate::db::repos::{JournalEntry, JournalRepo, NewJournalEntry};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;

/// GET /api/diarios/{user_id}
async fn list_entries(
    State(state): State<Arc<AppState>>,
    PathId(user_id): PathId,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let entries = JournalRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(entries))
}

/// POST /api/diarios
async fn create_entry(
    State(state): State<Arc<AppState>>,
    JsonBody(entry): JsonBody<NewJournalEntry>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = JournalRepo::new(&state.pool).create(&entry).await?;
    Ok(Json(CreatedResponse::new(id)))
}

/// DELETE /api/diarios/{id}
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<Json<SuccessResponse>, ApiError> {
    JournalRepo::new(&state.pool).delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Journal routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diarios", post(create_entry))
        .route("/api/diarios/{id}", get(list_entries).delete(delete_entry))
}
