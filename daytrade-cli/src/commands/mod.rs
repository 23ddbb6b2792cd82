//! Command implementations for the daytrade CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use clap::Args;

use daytrade_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use daytrade_server::DatabaseSettings;

/// Database connection flags shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Database URL (overrides DB_HOST/DB_NAME/...)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Resolve settings from the flag, then DATABASE_URL, then DB_* variables.
    pub fn settings(&self) -> Result<DatabaseSettings> {
        if let Some(url) = self.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(DatabaseSettings::Url(url.clone()));
        }

        DatabaseSettings::from_env().context(
            "Database not configured. Set --database-url, DATABASE_URL, or DB_HOST/DB_NAME/DB_USER/DB_PASSWORD (env or ~/.daytrade/.env)",
        )
    }
}
