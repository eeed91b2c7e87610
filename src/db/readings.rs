//! Statements against the per-channel reading tables.
//!
//! Every function checks a connection out of the pool, issues exactly one
//! statement and hands the connection back when the guard drops, on the
//! success and error paths alike. Table names come from [`Channel`] only.

use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use super::models::{Channel, Reading};

/// Number of rows returned by the history endpoints.
pub const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("reading value must be a finite number, got {0}")]
    NonFinite(f64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub async fn create_table(pool: &PgPool, channel: Channel) -> StoreResult<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id           SERIAL           PRIMARY KEY,
            leitura      DOUBLE PRECISION NOT NULL,
            data_criacao TIMESTAMPTZ      NOT NULL
        )
        "#,
        channel.table_name()
    );

    let mut conn = pool.acquire().await?;
    sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(())
}

/// Appends one reading stamped with the current server time.
pub async fn insert(pool: &PgPool, channel: Channel, value: f64) -> StoreResult<Reading> {
    if !value.is_finite() {
        return Err(StoreError::NonFinite(value));
    }

    let sql = format!(
        "INSERT INTO {} (leitura, data_criacao) VALUES ($1, $2) \
         RETURNING id, leitura, data_criacao",
        channel.table_name()
    );

    let mut conn = pool.acquire().await?;
    let reading = sqlx::query_as::<_, Reading>(&sql)
        .bind(value)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

    debug!(channel = %channel, id = reading.id, leitura = reading.leitura, "Reading stored");
    Ok(reading)
}

/// The row with the greatest id, or `None` when the table is empty.
pub async fn latest(pool: &PgPool, channel: Channel) -> StoreResult<Option<Reading>> {
    let sql = format!(
        "SELECT id, leitura, data_criacao FROM {} ORDER BY id DESC LIMIT 1",
        channel.table_name()
    );

    let mut conn = pool.acquire().await?;
    let row = sqlx::query_as::<_, Reading>(&sql)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Up to `limit` rows, most recent first.
pub async fn history(pool: &PgPool, channel: Channel, limit: i64) -> StoreResult<Vec<Reading>> {
    let sql = format!(
        "SELECT id, leitura, data_criacao FROM {} ORDER BY id DESC LIMIT $1",
        channel.table_name()
    );

    let mut conn = pool.acquire().await?;
    let rows = sqlx::query_as::<_, Reading>(&sql)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Removes every row and restarts the id sequence at 1.
pub async fn truncate(pool: &PgPool, channel: Channel) -> StoreResult<()> {
    let sql = format!("TRUNCATE TABLE {} RESTART IDENTITY", channel.table_name());

    let mut conn = pool.acquire().await?;
    sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(())
}

/// Removes the table. Writes and reads fail until [`create_table`] runs again.
pub async fn drop_table(pool: &PgPool, channel: Channel) -> StoreResult<()> {
    let sql = format!("DROP TABLE IF EXISTS {}", channel.table_name());

    let mut conn = pool.acquire().await?;
    sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(())
}
