//! Easydb sql loader
//!
//! Runs built statements on a single `MySqlConnection`, binding every parameter.

use async_trait::async_trait;
use easydb_core::{Record, Value};
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySqlArguments, MySqlQueryResult, MySqlRow};
use sqlx::{Arguments, FromRow, MySqlConnection};

use super::{fetch_process, SqlRowProcessor};
use crate::sql_adt::{ExecutionResult, SqlStatement};
use crate::{SqlError, SqlResult};

/// turn MySqlQueryResult into ExecutionResult
impl From<MySqlQueryResult> for ExecutionResult {
    fn from(result: MySqlQueryResult) -> Self {
        ExecutionResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        }
    }
}

/// bind statement parameters in order
pub(crate) fn to_arguments(values: &[Value]) -> SqlResult<MySqlArguments> {
    let mut args = MySqlArguments::default();
    for v in values {
        add_argument(&mut args, v).map_err(|e| SqlError::Encode(e.to_string()))?;
    }

    Ok(args)
}

fn add_argument(args: &mut MySqlArguments, value: &Value) -> Result<(), BoxDynError> {
    match value {
        Value::Bool(v) => args.add(*v),
        Value::I64(v) => args.add(*v),
        Value::U64(v) => args.add(*v),
        Value::F64(v) => args.add(*v),
        Value::String(v) => args.add(v.clone()),
        Value::Bytes(v) => args.add(v.clone()),
        Value::Date(v) => args.add(*v),
        Value::Time(v) => args.add(*v),
        Value::DateTime(v) => args.add(*v),
        Value::Decimal(v) => args.add(*v),
        Value::Uuid(v) => args.add(*v),
        Value::Json(v) => args.add(sqlx::types::Json(v.clone())),
        Value::Null => args.add(None::<String>),
    }
}

/// database loader interface
#[async_trait]
pub(crate) trait EasydbLoader: Send {
    /// fetch all rows as records
    async fn fetch_all(&mut self, stmt: &SqlStatement) -> SqlResult<Vec<Record>>;

    /// fetch at most one row
    async fn fetch_optional(&mut self, stmt: &SqlStatement) -> SqlResult<Option<Record>>;

    /// fetch all rows into a user type
    async fn fetch_all_as<T>(&mut self, stmt: &SqlStatement) -> SqlResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin;

    /// statement execution
    async fn execute(&mut self, stmt: &SqlStatement) -> SqlResult<ExecutionResult>;
}

#[async_trait]
impl EasydbLoader for MySqlConnection {
    async fn fetch_all(&mut self, stmt: &SqlStatement) -> SqlResult<Vec<Record>> {
        let mut srp = SqlRowProcessor::new();
        let res = fetch_process!(&mut *self, stmt, srp, fetch_all);

        Ok(res)
    }

    async fn fetch_optional(&mut self, stmt: &SqlStatement) -> SqlResult<Option<Record>> {
        let mut srp = SqlRowProcessor::new();
        let res = fetch_process!(&mut *self, stmt, srp, fetch_optional);

        Ok(res)
    }

    async fn fetch_all_as<T>(&mut self, stmt: &SqlStatement) -> SqlResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let res = sqlx::query_as_with::<_, T, _>(&stmt.sql, to_arguments(&stmt.values)?)
            .fetch_all(&mut *self)
            .await?;

        Ok(res)
    }

    async fn execute(&mut self, stmt: &SqlStatement) -> SqlResult<ExecutionResult> {
        let res = sqlx::query_with(&stmt.sql, to_arguments(&stmt.values)?)
            .execute(&mut *self)
            .await?;

        Ok(res.into())
    }
}

#[cfg(test)]
mod test_loader {
    use super::*;
    use crate::{date, value};

    #[test]
    fn every_value_is_bound() {
        let values = vec![
            value!(1),
            value!("D'Ruel"),
            value!(date!(2022, 3, 1)),
            value!(serde_json::json!({"k": "v"})),
            Value::Null,
        ];
        let args = to_arguments(&values).unwrap();

        assert_eq!(args.len(), values.len());
    }
}
