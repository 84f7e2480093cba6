mod transaction_repo;

use crate::transaction_repo::TransactionRepo;
use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::info;

pub use transaction_repo::SQLxTransactionRepo;

const SCHEMA: &str = include_str!("../../schema.sql");

pub async fn create_repo(
    connect_options: PgConnectOptions,
    max_pool_size: u32,
) -> Result<Arc<dyn TransactionRepo>, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect_with(connect_options)
        .await
        .context("Unable to connect to database")?;
    ensure_schema(&pool).await?;

    Ok(Arc::new(SQLxTransactionRepo::new(pool)))
}

/// Creates the transactions table if it does not exist yet.
pub async fn ensure_schema(pool: &Pool<Postgres>) -> Result<(), anyhow::Error> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("Unable to create transactions table")?;
    info!("Transactions table ready");
    Ok(())
}
