//! Operation (trade record) repository
//!
//! The caller computes gross/net results, fees and tax; rows are stored
//! exactly as supplied.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{decimal_at, optional_decimal_at, DbError, MONEY_SCALE};

/// Stored trade record
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "ativo")]
    pub ticker: String,
    #[serde(rename = "tipo")]
    pub side: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[serde(rename = "preco_entrada")]
    pub entry_price: Decimal,
    #[serde(rename = "preco_saida")]
    pub exit_price: Decimal,
    pub stop_loss: Option<Decimal>,
    #[serde(rename = "resultado_bruto")]
    pub gross_result: Option<Decimal>,
    #[serde(rename = "corretagem")]
    pub brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos")]
    pub exchange_fees: Option<Decimal>,
    #[serde(rename = "taxa_liquidacao")]
    pub settlement_fee: Option<Decimal>,
    #[serde(rename = "custo_total")]
    pub total_cost: Option<Decimal>,
    #[serde(rename = "imposto")]
    pub tax: Option<Decimal>,
    #[serde(rename = "resultado_final")]
    pub net_result: Option<Decimal>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl<'r> FromRow<'r, PgRow> for Operation {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("data")?,
            ticker: row.try_get("ativo")?,
            side: row.try_get("tipo")?,
            quantity: row.try_get("quantidade")?,
            entry_price: decimal_at(row, "preco_entrada", MONEY_SCALE)?,
            exit_price: decimal_at(row, "preco_saida", MONEY_SCALE)?,
            stop_loss: optional_decimal_at(row, "stop_loss", MONEY_SCALE)?,
            gross_result: optional_decimal_at(row, "resultado_bruto", MONEY_SCALE)?,
            brokerage: optional_decimal_at(row, "corretagem", MONEY_SCALE)?,
            exchange_fees: optional_decimal_at(row, "emolumentos", MONEY_SCALE)?,
            settlement_fee: optional_decimal_at(row, "taxa_liquidacao", MONEY_SCALE)?,
            total_cost: optional_decimal_at(row, "custo_total", MONEY_SCALE)?,
            tax: optional_decimal_at(row, "imposto", MONEY_SCALE)?,
            net_result: optional_decimal_at(row, "resultado_final", MONEY_SCALE)?,
            notes: row.try_get("observacoes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Trade record as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct NewOperation {
    pub user_id: i32,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "ativo")]
    pub ticker: String,
    #[serde(rename = "tipo")]
    pub side: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[serde(rename = "preco_entrada")]
    pub entry_price: Decimal,
    #[serde(rename = "preco_saida")]
    pub exit_price: Decimal,
    pub stop_loss: Option<Decimal>,
    #[serde(rename = "resultado_bruto")]
    pub gross_result: Option<Decimal>,
    #[serde(rename = "corretagem")]
    pub brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos")]
    pub exchange_fees: Option<Decimal>,
    #[serde(rename = "taxa_liquidacao")]
    pub settlement_fee: Option<Decimal>,
    #[serde(rename = "custo_total")]
    pub total_cost: Option<Decimal>,
    #[serde(rename = "imposto")]
    pub tax: Option<Decimal>,
    #[serde(rename = "resultado_final")]
    pub net_result: Option<Decimal>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

/// Operation repository
pub struct OperationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OperationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All trades for a user, latest trading day first, then latest entered.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Operation>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT *
            FROM dt_operacoes
            WHERE user_id = $1
            ORDER BY data DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a trade, returning its id.
    pub async fn create(&self, op: &NewOperation) -> Result<i32, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO dt_operacoes (
                user_id, data, ativo, tipo, quantidade, preco_entrada, preco_saida,
                stop_loss, resultado_bruto, corretagem, emolumentos, taxa_liquidacao,
                custo_total, imposto, resultado_final, observacoes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(op.user_id)
        .bind(op.date)
        .bind(&op.ticker)
        .bind(&op.side)
        .bind(op.quantity)
        .bind(op.entry_price)
        .bind(op.exit_price)
        .bind(op.stop_loss)
        .bind(op.gross_result)
        .bind(op.brokerage)
        .bind(op.exchange_fees)
        .bind(op.settlement_fee)
        .bind(op.total_cost)
        .bind(op.tax)
        .bind(op.net_result)
        .bind(&op.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Delete by id regardless of owner. Idempotent; returns rows removed.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM dt_operacoes WHERE id = $1")
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
    fn new_operation_accepts_numbers_and_strings() {
        let op: NewOperation = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "data": "2024-03-15",
            "ativo": "WINJ24",
            "tipo": "compra",
            "quantidade": 2,
            "preco_entrada": 128500.5,
            "preco_saida": "128700.00",
            "resultado_final": -12.3
        }))
        .unwrap();

        assert_eq!(op.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(op.entry_price, Decimal::new(1285005, 1));
        assert_eq!(op.exit_price, Decimal::new(12870000, 2));
        assert_eq!(op.net_result, Some(Decimal::new(-123, 1)));
        assert_eq!(op.stop_loss, None);
        assert_eq!(op.notes, None);
    }

    #[test]
    fn new_operation_requires_prices() {
        let result: Result<NewOperation, _> = serde_json::from_value(serde_json::json!({
            "user_id": 1,
            "data": "2024-03-15",
            "ativo": "WINJ24",
            "tipo": "compra",
            "quantidade": 2
        }));
        assert!(result.is_err());
    }

    #[test]
    fn operation_serializes_with_column_names() {
        let op = Operation {
            id: 7,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            ticker: "PETR4".into(),
            side: "venda".into(),
            quantity: 100,
            entry_price: Decimal::new(3850, 2),
            exit_price: Decimal::new(3820, 2),
            stop_loss: None,
            gross_result: Some(Decimal::new(3000, 2)),
            brokerage: None,
            exchange_fees: None,
            settlement_fee: None,
            total_cost: None,
            tax: None,
            net_result: None,
            notes: Some("scalp".into()),
            created_at: None,
        };

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["data"], "2024-03-15");
        assert_eq!(json["ativo"], "PETR4");
        assert_eq!(json["preco_entrada"], "38.50");
        assert_eq!(json["resultado_bruto"], "30.00");
        assert_eq!(json["observacoes"], "scalp");
        assert!(json["stop_loss"].is_null());
    }
}
