//! Create the journal schema and exit

use anyhow::{Context, Result};
use clap::Parser;

use daytrade_server::db::{create_pool_with_options, schema};

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the schema initializer, failing on any error.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let settings = args.database.settings()?;
    tracing::info!("Creating journal schema on {}", settings);

    let pool = create_pool_with_options(
        settings
            .connect_options()
            .context("Invalid database settings")?,
        args.database.max_connections,
    )
    .await
    .context("Failed to connect to database")?;

    schema::run(&pool)
        .await
        .context("Failed to create journal tables")?;
    pool.close().await;

    println!("Schema is up to date");
    Ok(())
}
