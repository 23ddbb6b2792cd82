//! Operating cost endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::{CreatedResponse, SuccessResponse};
use crate::db::repos::{CostEntry, CostRepo, NewCostEntry};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::server::AppState;

/// GET /api/custos/{user_id}
async fn list_costs(
    State(state): State<Arc<AppState>>,
    PathId(user_id): PathId,
) -> Result<Json<Vec<CostEntry>>, ApiError> {
    let costs = CostRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(costs))
}

/// POST /api/custos - fee components default to zero
async fn create_cost(
    State(state): State<Arc<AppState>>,
    JsonBody(cost): JsonBody<NewCostEntry>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = CostRepo::new(&state.pool).create(&cost).await?;
    tracing::debug!(id, user_id = cost.user_id, total = %cost.total, "Cost recorded");
    Ok(Json(CreatedResponse::new(id)))
}

/// DELETE /api/custos/{id}
async fn delete_cost(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<Json<SuccessResponse>, ApiError> {
    CostRepo::new(&state.pool).delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Cost routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/custos", post(create_cost))
        .route("/api/custos/{id}", get(list_costs).delete(delete_cost))
}
