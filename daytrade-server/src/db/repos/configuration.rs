//! Risk and fee settings repository
//!
//! At most one row per user, written with a single upsert.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{optional_decimal_at, DbError, MONEY_SCALE, RATE_SCALE};

/// Stored settings row
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "capital_total")]
    pub total_capital: Option<Decimal>,
    #[serde(rename = "risco_por_operacao")]
    pub risk_per_operation: Option<Decimal>,
    #[serde(rename = "meta_diaria")]
    pub daily_target: Option<Decimal>,
    #[serde(rename = "perda_maxima_diaria")]
    pub daily_max_loss: Option<Decimal>,
    #[serde(rename = "corretagem_padrao")]
    pub default_brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos_padrao")]
    pub default_exchange_fee: Option<Decimal>,
    #[serde(rename = "taxa_liquidacao_padrao")]
    pub default_settlement_fee: Option<Decimal>,
}

impl<'r> FromRow<'r, PgRow> for Configuration {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            total_capital: optional_decimal_at(row, "capital_total", MONEY_SCALE)?,
            risk_per_operation: optional_decimal_at(row, "risco_por_operacao", MONEY_SCALE)?,
            daily_target: optional_decimal_at(row, "meta_diaria", MONEY_SCALE)?,
            daily_max_loss: optional_decimal_at(row, "perda_maxima_diaria", MONEY_SCALE)?,
            default_brokerage: optional_decimal_at(row, "corretagem_padrao", MONEY_SCALE)?,
            default_exchange_fee: optional_decimal_at(row, "emolumentos_padrao", RATE_SCALE)?,
            default_settlement_fee: optional_decimal_at(row, "taxa_liquidacao_padrao", RATE_SCALE)?,
        })
    }
}

/// Full replacement of a user's settings
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationUpsert {
    pub user_id: i32,
    #[serde(rename = "capital_total")]
    pub total_capital: Option<Decimal>,
    #[serde(rename = "risco_por_operacao")]
    pub risk_per_operation: Option<Decimal>,
    #[serde(rename = "meta_diaria")]
    pub daily_target: Option<Decimal>,
    #[serde(rename = "perda_maxima_diaria")]
    pub daily_max_loss: Option<Decimal>,
    #[serde(rename = "corretagem_padrao")]
    pub default_brokerage: Option<Decimal>,
    #[serde(rename = "emolumentos_padrao")]
    pub default_exchange_fee: Option<Decimal>,
    #[serde(rename = "taxa_liquidacao_padrao")]
    pub default_settlement_fee: Option<Decimal>,
}

/// Configuration repository
pub struct ConfigurationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ConfigurationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Settings for a user, if any were saved.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Option<Configuration>, DbError> {
        let row = sqlx::query_as("SELECT * FROM dt_configuracoes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Insert or overwrite every value column in one statement.
    ///
    /// Fields omitted by the caller are stored as NULL, never merged.
    pub async fn upsert(&self, config: &ConfigurationUpsert) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO dt_configuracoes (
                user_id, capital_total, risco_por_operacao, meta_diaria,
                perda_maxima_diaria, corretagem_padrao, emolumentos_padrao,
                taxa_liquidacao_padrao
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                capital_total = EXCLUDED.capital_total,
                risco_por_operacao = EXCLUDED.risco_por_operacao,
                meta_diaria = EXCLUDED.meta_diaria,
                perda_maxima_diaria = EXCLUDED.perda_maxima_diaria,
                corretagem_padrao = EXCLUDED.corretagem_padrao,
                emolumentos_padrao = EXCLUDED.emolumentos_padrao,
                taxa_liquidacao_padrao = EXCLUDED.taxa_liquidacao_padrao
            "#,
        )
        .bind(config.user_id)
        .bind(config.total_capital)
        .bind(config.risk_per_operation)
        .bind(config.daily_target)
        .bind(config.daily_max_loss)
        .bind(config.default_brokerage)
        .bind(config.default_exchange_fee)
        .bind(config.default_settlement_fee)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
