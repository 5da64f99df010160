use std::collections::VecDeque;

use color_eyre::eyre::{eyre, Result};
use tokio::sync::Mutex;

use crate::domain::{DbHandler, DbHandlerError, Row, SqlValue, Statement};

/// One statement the handler expects to receive, and what it answers.
#[derive(Debug, Clone)]
pub struct Expectation {
    sql: String,
    params: Option<Vec<SqlValue>>,
    response: Response,
}

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<Row>),
    Failure(String),
}

impl Expectation {
    /// Expects `sql`, compared after collapsing whitespace. Answers with no
    /// rows unless told otherwise.
    pub fn query(sql: &str) -> Self {
        Self {
            sql: normalize(sql),
            params: None,
            response: Response::Rows(Vec::new()),
        }
    }

    pub fn with_params(mut self, params: Vec<SqlValue>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn returning_rows(mut self, rows: Vec<Row>) -> Self {
        self.response = Response::Rows(rows);
        self
    }

    pub fn returning_error(mut self, message: &str) -> Self {
        self.response = Response::Failure(message.to_owned());
        self
    }
}

#[derive(Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    mismatches: Vec<String>,
    executed: Vec<Statement>,
}

/// In-memory `DbHandler` that replays a fixed script of statements.
///
/// Expectations are consumed in order. A statement that does not match the
/// next expectation fails with `DbHandlerError::UnexpectedError` and is
/// recorded, so `expectations_were_met` reports it afterwards.
#[derive(Default)]
pub struct ScriptedDbHandler {
    script: Mutex<Script>,
}

impl ScriptedDbHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.script.get_mut().expectations.push_back(expectation);
        self
    }

    pub async fn executed(&self) -> Vec<Statement> {
        self.script.lock().await.executed.clone()
    }

    pub async fn expectations_were_met(&self) -> Result<()> {
        let script = self.script.lock().await;
        if let Some(mismatch) = script.mismatches.first() {
            return Err(eyre!(mismatch.clone()));
        }
        if let Some(pending) = script.expectations.front() {
            return Err(eyre!(
                "{} expectation(s) were not met, next: {}",
                script.expectations.len(),
                pending.sql
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DbHandler for ScriptedDbHandler {
    #[tracing::instrument(name = "Replaying scripted statement", skip_all)]
    async fn query(
        &self,
        statement: &Statement,
    ) -> Result<Vec<Row>, DbHandlerError> {
        let mut script = self.script.lock().await;
        script.executed.push(statement.clone());

        let sql = normalize(statement.sql());
        let expectation = match script.expectations.pop_front() {
            Some(expectation) => expectation,
            None => {
                return Err(record(
                    &mut script,
                    format!("unexpected statement: {sql}"),
                ))
            }
        };

        if expectation.sql != sql {
            return Err(record(
                &mut script,
                format!(
                    "statement mismatch: expected `{}`, got `{sql}`",
                    expectation.sql
                ),
            ));
        }

        if let Some(params) = &expectation.params {
            if params.as_slice() != statement.params() {
                return Err(record(
                    &mut script,
                    format!(
                        "parameter mismatch for `{sql}`: expected {:?}, got {:?}",
                        params,
                        statement.params()
                    ),
                ));
            }
        }

        match expectation.response {
            Response::Rows(rows) => Ok(rows),
            Response::Failure(message) => {
                Err(DbHandlerError::UnexpectedError(eyre!(message)))
            }
        }
    }
}

fn record(script: &mut Script, mismatch: String) -> DbHandlerError {
    tracing::warn!("{}", mismatch);
    script.mismatches.push(mismatch.clone());
    DbHandlerError::UnexpectedError(eyre!(mismatch))
}

fn normalize(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
