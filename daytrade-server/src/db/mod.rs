//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - The pool is created once and handed to the HTTP layer
//! - One statement per request; no multi-statement transactions
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{check_connection, create_lazy_pool, create_pool, create_pool_with_options};
pub use repos::*;
