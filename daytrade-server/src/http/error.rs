//! API error types with IntoResponse
//!
//! Every failure renders as `{"error": "<message>"}` with a status code
//! chosen by the variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::password::PasswordError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing, short or malformed input (400)
    Validation(ValidationError),

    /// Credentials did not match (401)
    Unauthorized,

    /// Unique key already taken (400)
    Conflict { message: String },

    /// Database error (500, message echoed and logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Unauthorized => "invalid username or password".to_owned(),
            Self::Conflict { message } => message.clone(),
            Self::Database(e) => e.to_string(),
            Self::Internal { .. } => "an internal error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
            Self::Validation(e) => tracing::debug!("Rejected request: {}", e),
            Self::Unauthorized | Self::Conflict { .. } => {}
        }

        let status = self.status();
        let body = json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            _ => Self::Database(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal {
            message: format!("blocking task failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "username" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "username is required");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"],
            "invalid username or password"
        );
    }

    #[tokio::test]
    async fn conflict_is_400() {
        let err = ApiError::from(DbError::Conflict {
            resource: "username",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "username already exists");
    }

    #[tokio::test]
    async fn database_error_is_500_with_message() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], sqlx::Error::PoolTimedOut.to_string());
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = ApiError::Internal {
            message: "argon2 blew up".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "an internal error occurred");
    }
}
