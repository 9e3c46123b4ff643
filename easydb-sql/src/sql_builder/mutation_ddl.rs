//! Sql Builder: ddl mutation

use easydb_core::Value;
use sea_query::{ColumnDef, Index, Table};

use super::{alias, column_alias, from_value_to_svalue, sql_adt, statement, table_ref};
use crate::{DdlMutation, SqlBuilder, SqlError, SqlResult};

const INT_LIMIT: u64 = 1 << 31;
const VARCHAR_LIMIT: usize = 256;
const TEXT_LIMIT: usize = 65_536;
const MEDIUMTEXT_LIMIT: usize = 16_777_216;

impl DdlMutation for SqlBuilder {
    /// create a table whose column types are inferred from the sample values
    fn create_table(&self, create_table: &sql_adt::CreateTable) -> SqlResult<String> {
        let table = table_ref(&create_table.table)?;
        if create_table.fields.is_empty() {
            return Err(SqlError::NoData);
        }

        let mut statement = Table::create();
        statement.table(table);

        if create_table.if_not_exists {
            statement.if_not_exists();
        }

        for (name, sample) in create_table.fields.iter() {
            let auto_increment = create_table.is_auto_increment(name);
            let default = create_table.defaults.get(name);
            statement.col(&mut gen_col(name, sample, default, auto_increment)?);
        }

        if let Some(pk) = &create_table.primary_key {
            if !create_table.fields.contains_column(pk) {
                return Err(SqlError::new_common_error(format!(
                    "primary key `{pk}` is not one of the fields"
                )));
            }
            statement.primary_key(Index::create().col(column_alias(pk)?));
        }

        statement
            .engine("InnoDB")
            .character_set("utf8mb4")
            .collate("utf8mb4_general_ci");

        Ok(statement!(schema: statement))
    }

    /// `DROP TABLE IF EXISTS`, dropping a missing table is not an error
    fn drop_table(&self, table_name: &str) -> SqlResult<String> {
        let mut statement = Table::drop();
        statement.table(table_ref(table_name)?).if_exists();

        Ok(statement!(schema: statement))
    }

    fn truncate_table(&self, table_name: &str) -> SqlResult<String> {
        let mut statement = Table::truncate();
        statement.table(table_ref(table_name)?);

        Ok(statement!(schema: statement))
    }
}

/// generate a column definition from its sample value
fn gen_col(
    name: &str,
    sample: &Value,
    default: Option<&Value>,
    auto_increment: bool,
) -> SqlResult<ColumnDef> {
    let mut c = ColumnDef::new(column_alias(name)?);
    c.custom(alias!(infer_column_type(sample)?));

    if auto_increment {
        c.not_null().auto_increment();
        return Ok(c);
    }

    match default {
        Some(v) if !v.is_null() => {
            c.default(from_value_to_svalue(v));
        }
        _ => {
            c.null().default(from_value_to_svalue(&Value::Null));
        }
    }

    Ok(c)
}

/// MySQL column type of a sample value
pub(crate) fn infer_column_type(sample: &Value) -> SqlResult<String> {
    let t = match sample {
        Value::Bool(_) => "tinyint(1)".to_owned(),
        Value::I64(v) if v.unsigned_abs() < INT_LIMIT => "int".to_owned(),
        Value::I64(_) | Value::U64(_) => "bigint".to_owned(),
        Value::F64(_) => "double".to_owned(),
        Value::String(s) => match s.strip_prefix('_') {
            Some(custom) => custom_column_type(custom)?,
            None if s.len() < VARCHAR_LIMIT => "varchar(255)".to_owned(),
            None if s.len() < TEXT_LIMIT => "text".to_owned(),
            None if s.len() < MEDIUMTEXT_LIMIT => "mediumtext".to_owned(),
            None => "longtext".to_owned(),
        },
        Value::Bytes(_) => "blob".to_owned(),
        Value::Date(_) => "date".to_owned(),
        Value::Time(_) => "time".to_owned(),
        Value::DateTime(_) => "datetime".to_owned(),
        Value::Decimal(_) => "decimal".to_owned(),
        Value::Uuid(_) => "binary(16)".to_owned(),
        Value::Json(_) => "json".to_owned(),
        Value::Null => "varchar(255)".to_owned(),
    };

    Ok(t)
}

/// a custom type literal such as `VARCHAR(64)` or `DECIMAL(10, 2)`
fn custom_column_type(t: &str) -> SqlResult<String> {
    let t = t.trim();
    let legal = t
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')' | ',' | ' '));

    if t.is_empty() || !legal {
        return Err(SqlError::InvalidColumnType(t.to_owned()));
    }

    Ok(t.to_owned())
}

#[cfg(test)]
mod test_mutation_ddl {
    use super::*;
    use crate::{date, record, value};

    #[test]
    fn column_type_inference() {
        assert_eq!(infer_column_type(&value!(true)).unwrap(), "tinyint(1)");
        assert_eq!(infer_column_type(&value!(2147483647)).unwrap(), "int");
        assert_eq!(infer_column_type(&value!(-2147483647)).unwrap(), "int");
        assert_eq!(infer_column_type(&value!(2147483648i64)).unwrap(), "bigint");
        assert_eq!(infer_column_type(&value!(u64::MAX)).unwrap(), "bigint");
        assert_eq!(infer_column_type(&value!(1.5)).unwrap(), "double");
        assert_eq!(infer_column_type(&value!("")).unwrap(), "varchar(255)");
        assert_eq!(
            infer_column_type(&value!("x".repeat(255))).unwrap(),
            "varchar(255)"
        );
        assert_eq!(infer_column_type(&value!("x".repeat(256))).unwrap(), "text");
        assert_eq!(
            infer_column_type(&value!("x".repeat(65_536))).unwrap(),
            "mediumtext"
        );
        assert_eq!(infer_column_type(&value!(date!(2022, 1, 1))).unwrap(), "date");
        assert_eq!(infer_column_type(&Value::Null).unwrap(), "varchar(255)");
    }

    #[test]
    fn custom_column_types() {
        assert_eq!(
            infer_column_type(&value!("_VARCHAR(64)")).unwrap(),
            "VARCHAR(64)"
        );
        assert_eq!(
            infer_column_type(&value!("_DECIMAL(10, 2)")).unwrap(),
            "DECIMAL(10, 2)"
        );

        let r = infer_column_type(&value!("_INT; DROP TABLE users"));
        assert!(matches!(r, Err(SqlError::InvalidColumnType(_))));

        let r = infer_column_type(&value!("_"));
        assert!(matches!(r, Err(SqlError::InvalidColumnType(_))));
    }

    #[test]
    fn create_table() {
        let ct = sql_adt::CreateTable::new(
            "users",
            record!["ID" => 0, "name" => "", "active" => true],
        )
        .defaults(record!["active" => true])
        .primary_key("ID");

        let sql = SqlBuilder.create_table(&ct).unwrap();

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS `users` ("));
        assert!(sql.contains("`ID` int NOT NULL AUTO_INCREMENT"));
        assert!(sql.contains("`name` varchar(255) NULL DEFAULT NULL"));
        assert!(sql.contains("`active` tinyint(1) DEFAULT"));
        assert!(sql.contains("PRIMARY KEY (`ID`)"));
        assert!(sql.contains("InnoDB"));
        assert!(sql.contains("utf8mb4_general_ci"));
    }

    #[test]
    fn create_table_errors() {
        let ct = sql_adt::CreateTable::new("users", record![]);
        assert!(matches!(SqlBuilder.create_table(&ct), Err(SqlError::NoData)));

        let ct = sql_adt::CreateTable::new("", record!["a" => 1]);
        assert!(matches!(SqlBuilder.create_table(&ct), Err(SqlError::NoTable)));

        let ct = sql_adt::CreateTable::new("t", record!["a" => 1]).primary_key("b");
        assert!(SqlBuilder.create_table(&ct).is_err());
    }

    #[test]
    fn drop_and_truncate() {
        assert_eq!(SqlBuilder.drop_table("users").unwrap(), "DROP TABLE IF EXISTS `users`");
        assert_eq!(
            SqlBuilder.truncate_table("db.users").unwrap(),
            "TRUNCATE TABLE `db`.`users`"
        );
    }
}
