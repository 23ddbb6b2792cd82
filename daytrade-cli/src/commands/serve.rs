//! HTTP server command
//!
//! Runs the journal API until Ctrl+C/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use daytrade_server::db::create_lazy_pool;
use daytrade_server::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let settings = args.database.settings()?;
    let bind_addr = SocketAddr::new(args.host, args.port);

    tracing::info!(
        "Starting daytrade server on {} (database: {})",
        bind_addr,
        settings
    );

    // Lazy: the API starts even when PostgreSQL is down
    let pool = create_lazy_pool(
        settings
            .connect_options()
            .context("Invalid database settings")?,
        args.database.max_connections,
    );

    let config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown; the pool is closed on the way out
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
