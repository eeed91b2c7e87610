pub mod models;
pub mod readings;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use models::Channel;

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let mut options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid PostgreSQL connection string")?;
    if let Some(mode) = &config.database_ssl_mode {
        let mode = PgSslMode::from_str(mode)
            .with_context(|| format!("invalid DATABASE_SSL_MODE: {mode:?}"))?;
        options = options.ssl_mode(mode);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_pool_max.get())
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Ensures every channel table exists. Safe to call on every startup.
pub async fn provision_tables(pool: &PgPool) -> Result<()> {
    for channel in Channel::ALL {
        readings::create_table(pool, channel)
            .await
            .with_context(|| format!("failed to create table {}", channel.table_name()))?;
        info!(table = channel.table_name(), "Table ready");
    }
    Ok(())
}
