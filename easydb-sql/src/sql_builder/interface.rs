//! Sql Builder interface
//!
//! DML statements are returned as `SqlStatement` (`?` placeholders plus ordered parameters),
//! DDL statements as plain strings.

use easydb_core::Record;

use super::sql_adt;
use crate::SqlResult;

/// DDL query
pub trait DdlQuery {
    fn check_table_exists(&self, table_name: &str) -> SqlResult<sql_adt::SqlStatement>;

    fn list_tables(&self) -> sql_adt::SqlStatement;
}

/// DDL mutation
pub trait DdlMutation {
    fn create_table(&self, create_table: &sql_adt::CreateTable) -> SqlResult<String>;

    fn drop_table(&self, table_name: &str) -> SqlResult<String>;

    fn truncate_table(&self, table_name: &str) -> SqlResult<String>;
}

/// DML query
pub trait DmlQuery {
    fn select(&self, select: &sql_adt::Select) -> SqlResult<sql_adt::SqlStatement>;
}

/// DML mutation
pub trait DmlMutation {
    fn insert(&self, table_name: &str, record: &Record) -> SqlResult<sql_adt::SqlStatement>;

    fn replace(&self, table_name: &str, record: &Record) -> SqlResult<sql_adt::SqlStatement>;

    fn insert_many(&self, table_name: &str, records: &[Record])
        -> SqlResult<sql_adt::SqlStatement>;

    fn update(&self, update: &sql_adt::Update) -> SqlResult<sql_adt::SqlStatement>;

    fn delete(&self, delete: &sql_adt::Delete) -> SqlResult<sql_adt::SqlStatement>;
}
