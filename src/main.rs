use color_eyre::eyre::{Result, WrapErr};
use member_registry::{
    get_postgres_pool, run_migrations,
    utils::{
        constants::{DATABASE_MAX_CONNECTIONS, DATABASE_URL},
        tracing::init_tracing,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pool = get_postgres_pool(&DATABASE_URL, *DATABASE_MAX_CONNECTIONS)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    run_migrations(&pool)
        .await
        .wrap_err("Failed to migrate the database")?;

    tracing::info!("database schema is up to date");
    Ok(())
}
