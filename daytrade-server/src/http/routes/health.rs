//! Health check and route directory

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Reported as connected without re-checking the pool
    pub database: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        database: "connected",
    })
}

/// GET / - static list of available endpoints
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Day Trade API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": ["/api/login", "/api/register"],
            "operacoes": ["/api/operacoes/{user_id}", "/api/operacoes (POST)", "/api/operacoes/{id} (DELETE)"],
            "configuracao": ["/api/configuracao/{user_id}", "/api/configuracao (POST)"],
            "diarios": ["/api/diarios/{user_id}", "/api/diarios (POST)", "/api/diarios/{id} (DELETE)"],
            "custos": ["/api/custos/{user_id}", "/api/custos (POST)", "/api/custos/{id} (DELETE)"],
            "health": "/health"
        }
    }))
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn index_lists_every_resource() {
        let Json(body) = index().await;
        let endpoints = body["endpoints"].as_object().unwrap();
        for key in ["auth", "operacoes", "configuracao", "diarios", "custos", "health"] {
            assert!(endpoints.contains_key(key), "missing {}", key);
        }
    }
}
