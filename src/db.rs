use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::OnceCell;
use tracing::info;

use crate::{config::DATABASE_URL, error::AppError};

static CLIENT: OnceCell<PgPool> = OnceCell::const_new();

/// Shared pool for the life of the process, built from `DATABASE_URL` on first use.
///
/// Concurrent first callers wait on the same initialisation. A failed attempt
/// leaves the cell empty, so the next call tries again. `acquire_timeout` only
/// matters on the call that builds the pool.
pub async fn get_client(acquire_timeout: Duration) -> Result<&'static PgPool, AppError> {
    CLIENT
        .get_or_try_init(|| connect(env::var(DATABASE_URL).ok(), acquire_timeout))
        .await
}

pub async fn connect(
    database_url: Option<String>,
    acquire_timeout: Duration,
) -> Result<PgPool, AppError> {
    let database_url = database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("{DATABASE_URL} is not configured")))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect(&database_url)
        .await?;

    info!("Connection to the database is successful");
    Ok(pool)
}
