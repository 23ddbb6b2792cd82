//! User repository
//!
//! Accounts are only ever created and looked up by username.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::Username;

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}

/// User row including the stored password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl From<UserCredentials> for UserSummary {
    fn from(u: UserCredentials) -> Self {
        Self {
            id: u.id,
            username: u.username,
        }
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. A taken username yields `DbError::Conflict`.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<UserSummary, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO dt_users (username, password)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, "username"))
    }

    /// Look up a user by exact username.
    pub async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, username, password
            FROM dt_users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}
