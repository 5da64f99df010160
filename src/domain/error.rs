use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemberRepositoryError {
    #[error("Member not found: {0}")]
    NotFound(String),
    #[error("Persistence failure")]
    PersistenceFailure(#[source] Report),
}

impl PartialEq for MemberRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::PersistenceFailure(_), Self::PersistenceFailure(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbHandlerError {
    #[error("Unsupported column type {type_name} for column {column}")]
    UnsupportedColumnType { column: String, type_name: String },
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for DbHandlerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::UnsupportedColumnType {
                    column: a,
                    type_name: x,
                },
                Self::UnsupportedColumnType {
                    column: b,
                    type_name: y,
                },
            ) => a == b && x == y,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RowDecodeError {
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Column {column} is not of type {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
    #[error("Column {0} is NULL")]
    UnexpectedNull(String),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
