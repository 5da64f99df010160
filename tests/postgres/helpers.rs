use std::{str::FromStr, sync::Arc};

use chrono::{TimeZone, Utc};
use member_registry::{
    domain::NewMember,
    get_postgres_pool, run_migrations,
    services::{db_handlers::PostgresDbHandler, MemberRepository},
    utils::constants::DATABASE_URL,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{
    postgres::{PgConnectOptions, PgConnection, PgPoolOptions},
    Connection, Executor, PgPool,
};
use test_context::AsyncTestContext;
use uuid::Uuid;

pub struct TestDb {
    pub pool: PgPool,
    pub handler: Arc<PostgresDbHandler>,
    pub repository: MemberRepository,
    pub tmp_db_name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let tmp_db_name = Uuid::new_v4().to_string();
        let pool = configure_postgresql(&tmp_db_name).await;
        let handler = Arc::new(PostgresDbHandler::new(pool.clone()));
        let repository = MemberRepository::new(handler.clone());

        Self {
            pool,
            handler,
            repository,
            tmp_db_name,
        }
    }
}

impl AsyncTestContext for TestDb {
    async fn setup() -> TestDb {
        TestDb::new().await
    }

    async fn teardown(self) {
        self.pool.close().await;
        delete_database(&self.tmp_db_name).await;
    }
}

pub fn get_test_member() -> NewMember {
    NewMember {
        no: "1".to_string(),
        profile_img: "http://hoge.png".to_string(),
        full_name: "emoshu company".to_string(),
        kana_name: "emoshu company".to_string(),
        motto: "頑張ります".to_string(),
        biography: "".to_string(),
        start_date: Utc.with_ymd_and_hms(2020, 4, 1, 9, 0, 0).unwrap(),
        end_date: None,
        employment_status_id: 1,
        status_id: 1,
    }
}

async fn configure_postgresql(db_name: &str) -> PgPool {
    let postgresql_conn_url = DATABASE_URL.to_owned();

    configure_database(&postgresql_conn_url, db_name).await;

    let postgresql_conn_url_with_db = Secret::new(format!(
        "{}/{}",
        postgresql_conn_url.expose_secret(),
        db_name
    ));

    get_postgres_pool(&postgresql_conn_url_with_db, 2)
        .await
        .expect("Failed to create Postgres connection pool!")
}

async fn configure_database(db_conn_string: &Secret<String>, db_name: &str) {
    let connection = PgPoolOptions::new()
        .connect(db_conn_string.expose_secret())
        .await
        .expect("Failed to create Postgres connection pool.");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to create database.");

    let db_conn_string =
        format!("{}/{}", db_conn_string.expose_secret(), db_name);

    let connection = PgPoolOptions::new()
        .connect(&db_conn_string)
        .await
        .expect("Failed to create Postgres connection pool.");

    run_migrations(&connection)
        .await
        .expect("Failed to migrate the database");
}

async fn delete_database(db_name: &str) {
    let postgresql_conn_url: String = DATABASE_URL.expose_secret().to_owned();

    let connection_options = PgConnectOptions::from_str(&postgresql_conn_url)
        .expect("Failed to parse PostgreSQL connection string");

    let mut connection = PgConnection::connect_with(&connection_options)
        .await
        .expect("Failed to connect to Postgres");

    // Kill any active connections to the database
    connection
        .execute(
            format!(
                r#"
                SELECT pg_terminate_backend(pg_stat_activity.pid)
                FROM pg_stat_activity
                WHERE pg_stat_activity.datname = '{}'
                  AND pid <> pg_backend_pid();
        "#,
                db_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to terminate connections.");

    connection
        .execute(format!(r#"DROP DATABASE "{}";"#, db_name).as_str())
        .await
        .expect("Failed to drop the database.");
}
