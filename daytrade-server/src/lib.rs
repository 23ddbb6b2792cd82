//! daytrade-server: HTTP API for a personal day-trading journal
//!
//! Users, trade records, risk settings, daily diary entries and operating
//! costs, each scoped to a user and stored in PostgreSQL. Every route maps
//! to a single parameterized statement.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod password;

pub use config::{ConfigError, DatabaseSettings};
pub use db::{create_lazy_pool, create_pool, create_pool_with_options};
pub use http::{build_router, run_server, serve, ApiError, AppState, ServerConfig, ServerError};
