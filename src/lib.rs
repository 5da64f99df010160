use secrecy::{ExposeSecret, Secret};
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};

pub mod domain;
pub mod services;
pub mod utils;

pub async fn get_postgres_pool(
    url: &Secret<String>,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url.expose_secret())
        .await
}

/// Creates the `members` table and its lookup tables if they are missing.
#[tracing::instrument(name = "Running database migrations", skip_all)]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}
