//! Easydb sql error
//!
//! This module contains the error types for the statement builder and the executor.

use easydb_core::{CommonError, CoreError};
use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

pub type SqlResult<T> = Result<T, SqlError>;

// ================================================================================================
// Nom error
// ================================================================================================

/// error type of the connection string parser
#[derive(Debug)]
pub struct NomError(String);

impl std::fmt::Display for NomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: AsRef<str>> From<(T, ErrorKind)> for NomError {
    fn from(error: (T, ErrorKind)) -> Self {
        let (s, kind) = error;
        NomError(format!("Nom error code: {}, {:?}", s.as_ref(), kind))
    }
}

impl<T: AsRef<str>> ParseError<T> for NomError {
    fn from_error_kind(_: T, kind: ErrorKind) -> Self {
        let s = format!("Nom error code:  {:?}", kind);
        NomError(s)
    }

    fn append(_: T, kind: ErrorKind, other: Self) -> Self {
        NomError(format!("{:?}\nerror code: {:?}", other, kind))
    }
}

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("common error {0}")]
    Common(CommonError),

    #[error("No table specified")]
    NoTable,

    #[error("No fields/data specified")]
    NoData,

    #[error("No database open")]
    NoDatabase,

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid column type: {0}")]
    InvalidColumnType(String),

    #[error("invalid connection info: {0}")]
    InvalidConnInfo(String),

    #[error("parameter encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    SeaQuery(#[from] sea_query::error::Error),

    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
}

impl SqlError {
    pub fn new_common_error<T>(msg: T) -> SqlError
    where
        T: Into<CommonError>,
    {
        SqlError::Common(msg.into())
    }

    pub fn new_invalid_filter<T: Into<String>>(msg: T) -> SqlError {
        SqlError::InvalidFilter(msg.into())
    }

    /// used in row processing, where `sqlx` expects its own error type
    pub fn turn_into_sqlx_decode_error(self) -> sqlx::Error {
        match self {
            SqlError::Sqlx(se) => se,
            _ => sqlx::Error::Decode(Box::new(self)),
        }
    }
}
