//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per call
//! - Unique-key conflicts surface as `DbError::Conflict` (no check-then-insert)
//! - Lists are scoped to a user and ordered newest first

pub mod configuration;
pub mod costs;
pub mod journal;
pub mod operations;
pub mod users;

pub use configuration::{Configuration, ConfigurationRepo, ConfigurationUpsert};
pub use costs::{CostEntry, CostRepo, NewCostEntry};
pub use journal::{JournalEntry, JournalRepo, NewJournalEntry};
pub use operations::{NewOperation, Operation, OperationRepo};
pub use users::{UserCredentials, UserRepo, UserSummary};

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::Row;

/// Scale of the `DECIMAL(10,2)` and `DECIMAL(5,2)` money columns
pub(crate) const MONEY_SCALE: u32 = 2;

/// Scale of the `DECIMAL(5,4)` default fee rates
pub(crate) const RATE_SCALE: u32 = 4;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} already exists")]
    Conflict { resource: &'static str },
}

impl DbError {
    /// Map a unique-constraint violation to `Conflict`, anything else to `Sqlx`.
    pub(crate) fn from_insert(err: sqlx::Error, resource: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict { resource },
            _ => Self::Sqlx(err),
        }
    }
}

/// Pin a decoded NUMERIC to its column scale.
///
/// sqlx decodes zero without a scale, so `0.00` would serialize as `"0"`.
fn at_scale(mut value: Decimal, scale: u32) -> Decimal {
    value.rescale(scale);
    value
}

/// Read a NOT NULL numeric column at its declared scale.
pub(crate) fn decimal_at(row: &PgRow, column: &str, scale: u32) -> Result<Decimal, sqlx::Error> {
    let value: Decimal = row.try_get(column)?;
    Ok(at_scale(value, scale))
}

/// Read a nullable numeric column at its declared scale.
pub(crate) fn optional_decimal_at(
    row: &PgRow,
    column: &str,
    scale: u32,
) -> Result<Option<Decimal>, sqlx::Error> {
    let value: Option<Decimal> = row.try_get(column)?;
    Ok(value.map(|v| at_scale(v, scale)))
}
