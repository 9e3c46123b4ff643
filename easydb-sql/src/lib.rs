//! Easydb SQL
//!
//! A thin CRUD layer over MySQL: records and filter expressions are turned into
//! parameterized statements by `SqlBuilder`, and `SqlExecutor` runs them on a single connection.
//!
//! ```rust
//! use easydb_sql::{sql_adt, xpr, DmlQuery, SqlBuilder};
//!
//! let select = sql_adt::Select::new("users")
//!     .columns(&["name"])
//!     .filter(&xpr!([xpr!("age", ">=", 18)]));
//! let stmt = SqlBuilder.select(&select).unwrap();
//!
//! assert!(stmt.sql.starts_with("SELECT `name` FROM `users` WHERE"));
//! assert_eq!(stmt.values.len(), 1);
//! ```

pub mod error;
pub mod sql_builder;
pub mod sql_executor;

pub use easydb_core::{
    date, datetime, record, time, value, CommonError, CoreError, CoreResult, Decimal, NaiveDate,
    NaiveDateTime, NaiveTime, Record, Uuid, Value, ValueType,
};

pub use error::{SqlError, SqlResult};
pub use sql_builder::builder::SqlBuilder;
pub use sql_builder::interface::{DdlMutation, DdlQuery, DmlMutation, DmlQuery};
pub use sql_builder::sql_adt;
pub use sql_executor::{SqlConnInfo, SqlEngine, SqlExecutor, SqlHelper};
