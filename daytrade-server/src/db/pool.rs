//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let settings = DatabaseSettings::from_env()?;
/// let pool = create_pool(settings.connect_options()?).await?;
/// ```
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(options, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create a pool that opens connections on first use.
///
/// Never fails up front, so a server can start while PostgreSQL is down.
pub fn create_lazy_pool(options: PgConnectOptions, max_connections: u32) -> PgPool {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(options)
}

/// Round-trip to the server, returning its clock.
pub async fn check_connection(pool: &PgPool) -> Result<DateTime<Utc>, sqlx::Error> {
    sqlx::query_scalar("SELECT NOW()").fetch_one(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p daytrade-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        create_pool(options).await.expect("pool creation failed")
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect_up_front() {
        let options: PgConnectOptions = "postgres://daytrade@127.0.0.1:1/unused".parse().unwrap();
        let pool = create_lazy_pool(options, 2);
        assert_eq!(pool.size(), 0);
        assert!(!pool.is_closed());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_reports_server_time() {
        let pool = test_pool().await;
        let now = check_connection(&pool).await.expect("query failed");
        assert!((Utc::now() - now).num_minutes().abs() < 5);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let pool = test_pool().await;

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
