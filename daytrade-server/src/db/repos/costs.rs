//! Operating cost repository

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{decimal_at, optional_decimal_at, DbError, MONEY_SCALE};

/// Stored cost record
#[derive(Debug, Clone, Serialize)]
pub struct CostEntry {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "corretagem")]
    pub brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos")]
    pub exchange_fees: Option<Decimal>,
    #[serde(rename = "registro")]
    pub registration: Option<Decimal>,
    #[serde(rename = "irrf")]
    pub withholding_tax: Option<Decimal>,
    pub total: Decimal,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl<'r> FromRow<'r, PgRow> for CostEntry {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("data")?,
            brokerage: optional_decimal_at(row, "corretagem", MONEY_SCALE)?,
            exchange_fees: optional_decimal_at(row, "emolumentos", MONEY_SCALE)?,
            registration: optional_decimal_at(row, "registro", MONEY_SCALE)?,
            withholding_tax: optional_decimal_at(row, "irrf", MONEY_SCALE)?,
            total: decimal_at(row, "total", MONEY_SCALE)?,
            description: row.try_get("descricao")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Cost record as submitted by the client.
///
/// Fee components are optional and stored as zero when absent; `total`
/// is required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCostEntry {
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "corretagem")]
    pub brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos")]
    pub exchange_fees: Option<Decimal>,
    #[serde(rename = "registro")]
    pub registration: Option<Decimal>,
    #[serde(rename = "irrf")]
    pub withholding_tax: Option<Decimal>,
    pub total: Decimal,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// Cost repository
pub struct CostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Costs for a user, latest day first, then latest entered.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<CostEntry>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT *
            FROM dt_custos
            WHERE user_id = $1
            ORDER BY data DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, cost: &NewCostEntry) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO dt_custos (
                user_id, data, corretagem, emolumentos, registro, irrf, total, descricao
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(cost.user_id)
        .bind(cost.date)
        .bind(cost.brokerage.unwrap_or_default())
        .bind(cost.exchange_fees.unwrap_or_default())
        .bind(cost.registration.unwrap_or_default())
        .bind(cost.withholding_tax.unwrap_or_default())
        .bind(cost.total)
        .bind(&cost.description)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Delete by id regardless of owner. Idempotent.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM dt_custos WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_components_are_optional() {
        let cost: NewCostEntry = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "data": "2024-05-02",
            "total": 42.9,
            "corretagem": null
        }))
        .unwrap();

        assert_eq!(cost.brokerage.unwrap_or_default(), Decimal::ZERO);
        assert_eq!(cost.withholding_tax, None);
        assert_eq!(cost.total, Decimal::new(429, 1));
    }

    #[test]
    fn total_is_required() {
        let result: Result<NewCostEntry, _> = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "data": "2024-05-02"
        }));
        assert!(result.is_err());
    }
}
