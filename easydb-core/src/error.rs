//! Core error

use thiserror::Error;

use crate::{Value, ValueType};

pub type CoreResult<T> = Result<T, CoreError>;

/// free-form error message, static or owned
#[derive(Debug)]
pub enum CommonError {
    Str(&'static str),
    String(String),
}

impl AsRef<str> for CommonError {
    fn as_ref(&self) -> &str {
        match self {
            CommonError::Str(s) => s,
            CommonError::String(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for CommonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&'static str> for CommonError {
    fn from(v: &'static str) -> Self {
        CommonError::Str(v)
    }
}

impl From<String> for CommonError {
    fn from(v: String) -> Self {
        CommonError::String(v)
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("common error: {0}")]
    Common(CommonError),

    #[error("cannot convert {from} value `{value}` into {into}")]
    Conversion {
        from: ValueType,
        value: String,
        into: String,
    },

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl CoreError {
    pub fn new_common_error<T>(msg: T) -> Self
    where
        T: Into<CommonError>,
    {
        CoreError::Common(msg.into())
    }

    /// a `Value` does not hold the requested Rust type
    pub fn new_conversion_error<T: Into<String>>(value: &Value, into: T) -> Self {
        CoreError::Conversion {
            from: value.dtype(),
            value: value.to_string(),
            into: into.into(),
        }
    }
}

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn conversion_message() {
        let e = CoreError::new_conversion_error(&Value::from("abc"), "i64");

        assert_eq!(e.to_string(), "cannot convert String value `abc` into i64");
    }
}
