//! Daily journal repository

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::DbError;

/// Stored diary entry
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "humor")]
    pub mood: Option<String>,
    #[serde(rename = "disciplina")]
    pub discipline: Option<i32>,
    #[serde(rename = "acertos")]
    pub went_right: Option<String>,
    #[serde(rename = "erros")]
    pub went_wrong: Option<String>,
    #[serde(rename = "aprendizados")]
    pub lessons: Option<String>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl<'r> FromRow<'r, PgRow> for JournalEntry {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("data")?,
            mood: row.try_get("humor")?,
            discipline: row.try_get("disciplina")?,
            went_right: row.try_get("acertos")?,
            went_wrong: row.try_get("erros")?,
            lessons: row.try_get("aprendizados")?,
            notes: row.try_get("observacoes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Diary entry as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct NewJournalEntry {
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "humor")]
    pub mood: Option<String>,
    #[serde(rename = "disciplina")]
    pub discipline: Option<i32>,
    #[serde(rename = "acertos")]
    pub went_right: Option<String>,
    #[serde(rename = "erros")]
    pub went_wrong: Option<String>,
    #[serde(rename = "aprendizados")]
    pub lessons: Option<String>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

/// Journal repository
pub struct JournalRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> JournalRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Entries for a user, latest day first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<JournalEntry>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT *
            FROM dt_diarios
            WHERE user_id = $1
            ORDER BY data DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, entry: &NewJournalEntry) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO dt_diarios (
                user_id, data, humor, disciplina, acertos, erros, aprendizados, observacoes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(&entry.mood)
        .bind(entry.discipline)
        .bind(&entry.went_right)
        .bind(&entry.went_wrong)
        .bind(&entry.lessons)
        .bind(&entry.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Delete by id regardless of owner. Idempotent.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM dt_diarios WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
