//! daytrade CLI - runs the day-trade journal API
//!
//! - `serve`: start the HTTP API (creates tables on startup)
//! - `migrate`: create tables and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "daytrade",
    author,
    version,
    about = "Day-trade journal API: accounts, trades, risk settings, diary and costs"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the journal tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so `env = "..."` fallbacks can come from .env
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();
    config::log_loaded(&env_files);

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["daytrade", "serve", "--database-url", "postgres://x/y"])
            .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(
                    args.database.database_url.as_deref(),
                    Some("postgres://x/y")
                );
                assert!(!args.cors_permissive);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn explicit_url_wins() {
        let cli = Cli::try_parse_from([
            "daytrade",
            "migrate",
            "--database-url",
            "postgres://u@h/db",
            "--max-connections",
            "3",
        ])
        .unwrap();
        let Commands::Migrate(args) = cli.command else {
            panic!("expected migrate");
        };
        assert_eq!(args.database.max_connections, 3);
        let settings = args.database.settings().unwrap();
        assert_eq!(
            settings,
            daytrade_server::DatabaseSettings::Url("postgres://u@h/db".into())
        );
    }
}
