//! Trade record endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::{CreatedResponse, SuccessResponse};
use crate::db::repos::{NewOperation, Operation, OperationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;

/// GET /api/operacoes/{user_id}
async fn list_operations(
    State(state): State<Arc<AppState>>,
    PathId(user_id): PathId,
) -> Result<Json<Vec<Operation>>, ApiError> {
    let operations = OperationRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(operations))
}

/// POST /api/operacoes
async fn create_operation(
    State(state): State<Arc<AppState>>,
    JsonBody(op): JsonBody<NewOperation>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = OperationRepo::new(&state.pool).create(&op).await?;
    tracing::debug!(id, user_id = op.user_id, ticker = %op.ticker, "Operation recorded");
    Ok(Json(CreatedResponse::new(id)))
}

/// DELETE /api/operacoes/{id}
async fn delete_operation(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<Json<SuccessResponse>, ApiError> {
    let removed = OperationRepo::new(&state.pool).delete(id).await?;
    tracing::debug!(id, removed, "Operation deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// Operation routes
///
/// The path parameter is a user id for GET and a row id for DELETE.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/operacoes", post(create_operation))
        .route("/api/operacoes/{id}", get(list_operations).delete(delete_operation))
}
