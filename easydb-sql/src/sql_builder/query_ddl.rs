//! Sql Builder: ddl query

use super::sql_adt::SqlStatement;
use crate::{DdlQuery, SqlBuilder, SqlError, SqlResult, Value};

impl DdlQuery for SqlBuilder {
    /// check whether table exists (use `fetch_optional` method)
    ///
    /// A `schema.table` name is looked up in that schema, a plain name in the current database.
    fn check_table_exists(&self, table_name: &str) -> SqlResult<SqlStatement> {
        let name = table_name.trim();
        let stmt = match name.split_once('.') {
            Some((schema, table)) if !schema.trim().is_empty() && !table.trim().is_empty() => {
                SqlStatement::new(
                    r#"
                    SELECT
                        1
                    FROM
                        information_schema.tables
                    WHERE
                        table_schema = ? AND table_name = ?
                    LIMIT 1
                    "#,
                    vec![Value::from(schema.trim()), Value::from(table.trim())],
                )
            }
            None if !name.is_empty() => SqlStatement::new(
                r#"
                SELECT
                    1
                FROM
                    information_schema.tables
                WHERE
                    table_schema = DATABASE() AND table_name = ?
                LIMIT 1
                "#,
                vec![Value::from(name)],
            ),
            _ => return Err(SqlError::NoTable),
        };

        Ok(stmt)
    }

    /// tables of the current database, ordered by name
    fn list_tables(&self) -> SqlStatement {
        SqlStatement::raw(
            r#"
            SELECT
                table_name AS `table_name`
            FROM
                information_schema.tables
            WHERE
                table_schema = DATABASE()
            ORDER BY
                table_name
            "#,
        )
    }
}

#[cfg(test)]
mod test_query_ddl {
    use super::*;
    use crate::value;

    #[test]
    fn table_exists_is_parameterized() {
        let stmt = SqlBuilder.check_table_exists("users").unwrap();

        assert!(stmt.sql.contains("table_schema = DATABASE() AND table_name = ?"));
        assert_eq!(stmt.values, vec![value!("users")]);

        let stmt = SqlBuilder.check_table_exists("db.users").unwrap();

        assert!(stmt.sql.contains("table_schema = ? AND table_name = ?"));
        assert_eq!(stmt.values, vec![value!("db"), value!("users")]);
    }

    #[test]
    fn table_exists_without_name() {
        assert!(matches!(
            SqlBuilder.check_table_exists(" "),
            Err(SqlError::NoTable)
        ));
        assert!(matches!(
            SqlBuilder.check_table_exists(".users"),
            Err(SqlError::NoTable)
        ));
    }

    #[test]
    fn list_tables() {
        let stmt = SqlBuilder.list_tables();

        assert!(stmt.sql.contains("ORDER BY"));
        assert!(stmt.values.is_empty());
    }
}
