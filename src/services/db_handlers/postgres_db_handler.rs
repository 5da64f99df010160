use chrono::{DateTime, NaiveDateTime, Utc};
use color_eyre::eyre::eyre;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::Query,
    Column, PgPool, Postgres, Row as _, TypeInfo,
};

use crate::domain::{DbHandler, DbHandlerError, Row, SqlValue, Statement};

pub struct PostgresDbHandler {
    pool: PgPool,
}

impl PostgresDbHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DbHandler for PostgresDbHandler {
    #[tracing::instrument(name = "Running statement against PostgreSQL", skip_all)]
    async fn query(
        &self,
        statement: &Statement,
    ) -> Result<Vec<Row>, DbHandlerError> {
        let query = statement
            .params()
            .iter()
            .fold(sqlx::query(statement.sql()), bind_param);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbHandlerError::UnexpectedError(eyre!(e)))?;

        tracing::debug!(rows = rows.len(), "statement completed");

        rows.iter().map(decode_row).collect()
    }
}

fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        SqlValue::BigInt(value) => query.bind(*value),
        SqlValue::Text(value) => query.bind(value.clone()),
        SqlValue::Timestamp(value) => query.bind(*value),
    }
}

fn decode_row(row: &PgRow) -> Result<Row, DbHandlerError> {
    let mut decoded = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let value = match column.type_info().name() {
            "INT2" => SqlValue::BigInt(
                row.try_get::<Option<i16>, _>(index)
                    .map_err(unexpected)?
                    .map(i64::from),
            ),
            "INT4" => SqlValue::BigInt(
                row.try_get::<Option<i32>, _>(index)
                    .map_err(unexpected)?
                    .map(i64::from),
            ),
            "INT8" => SqlValue::BigInt(
                row.try_get::<Option<i64>, _>(index).map_err(unexpected)?,
            ),
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => SqlValue::Text(
                row.try_get::<Option<String>, _>(index)
                    .map_err(unexpected)?,
            ),
            "TIMESTAMPTZ" => SqlValue::Timestamp(
                row.try_get::<Option<DateTime<Utc>>, _>(index)
                    .map_err(unexpected)?,
            ),
            "TIMESTAMP" => SqlValue::Timestamp(
                row.try_get::<Option<NaiveDateTime>, _>(index)
                    .map_err(unexpected)?
                    .map(|timestamp| timestamp.and_utc()),
            ),
            other => {
                return Err(DbHandlerError::UnsupportedColumnType {
                    column: column.name().to_owned(),
                    type_name: other.to_owned(),
                })
            }
        };
        decoded.push(column.name().to_owned(), value);
    }

    Ok(decoded)
}

fn unexpected(e: sqlx::Error) -> DbHandlerError {
    DbHandlerError::UnexpectedError(eyre!(e))
}
