//! Sql Builder: dml mutation

use easydb_core::Record;
use sea_query::{InsertStatement, Query};

use super::{column_alias, filter_builder, from_value_to_sexpr, sql_adt, statement, table_ref};
use crate::{DmlMutation, SqlBuilder, SqlError, SqlResult};

impl DmlMutation for SqlBuilder {
    /// `INSERT INTO <table> (<columns>) VALUES (?, ..)`
    fn insert(&self, table_name: &str, record: &Record) -> SqlResult<sql_adt::SqlStatement> {
        let statement = insert_statement(table_name, std::slice::from_ref(record))?;

        Ok(statement!(query: statement))
    }

    /// `REPLACE INTO <table> (<columns>) VALUES (?, ..)`
    fn replace(&self, table_name: &str, record: &Record) -> SqlResult<sql_adt::SqlStatement> {
        let mut statement = insert_statement(table_name, std::slice::from_ref(record))?;
        statement.replace();

        Ok(statement!(query: statement))
    }

    /// multi-row insert, every record must share the columns of the first one
    fn insert_many(
        &self,
        table_name: &str,
        records: &[Record],
    ) -> SqlResult<sql_adt::SqlStatement> {
        let statement = insert_statement(table_name, records)?;

        Ok(statement!(query: statement))
    }

    /// `UPDATE <table> SET <column> = ?, .. [WHERE ..]`
    fn update(&self, update: &sql_adt::Update) -> SqlResult<sql_adt::SqlStatement> {
        if update.set.is_empty() {
            return Err(SqlError::NoData);
        }

        let mut statement = Query::update();
        statement.table(table_ref(&update.table)?);

        let values = update
            .set
            .iter()
            .map(|(k, v)| Ok((column_alias(k)?, from_value_to_sexpr(v))))
            .collect::<SqlResult<Vec<_>>>()?;
        statement.values(values);

        if let Some(flt) = &update.filter {
            filter_builder(&mut statement, flt)?;
        }

        Ok(statement!(query: statement))
    }

    /// `DELETE FROM <table> [WHERE ..]`
    fn delete(&self, delete: &sql_adt::Delete) -> SqlResult<sql_adt::SqlStatement> {
        let mut statement = Query::delete();
        statement.from_table(table_ref(&delete.table)?);

        if let Some(flt) = &delete.filter {
            filter_builder(&mut statement, flt)?;
        }

        Ok(statement!(query: statement))
    }
}

fn insert_statement(table_name: &str, records: &[Record]) -> SqlResult<InsertStatement> {
    let table = table_ref(table_name)?;
    let first = match records.first() {
        Some(r) if !r.is_empty() => r,
        _ => return Err(SqlError::NoData),
    };
    let columns = first.columns();

    let mut statement = Query::insert();
    statement.into_table(table).columns(
        columns
            .iter()
            .map(|c| column_alias(c))
            .collect::<SqlResult<Vec<_>>>()?,
    );

    for (idx, r) in records.iter().enumerate() {
        if r.columns() != columns {
            return Err(SqlError::new_common_error(format!(
                "record {idx} has columns {:?}, expected {:?}",
                r.columns(),
                columns
            )));
        }
        statement.values(r.values().into_iter().map(from_value_to_sexpr))?;
    }

    Ok(statement)
}

#[cfg(test)]
mod test_mutation_dml {
    use super::*;
    use crate::{record, value, xpr, xpr_or, Value};

    #[test]
    fn insert() {
        let r = record!["name" => "D'Ruel", "age" => 31, "email" => None::<String>];
        let stmt = SqlBuilder.insert("users", &r).unwrap();

        assert_eq!(
            stmt.sql,
            "INSERT INTO `users` (`name`, `age`, `email`) VALUES (?, ?, ?)"
        );
        assert_eq!(stmt.values, vec![value!("D'Ruel"), value!(31), Value::Null]);
    }

    #[test]
    fn replace() {
        let r = record!["ID" => 1, "name" => "Mia"];
        let stmt = SqlBuilder.replace("users", &r).unwrap();

        assert_eq!(stmt.sql, "REPLACE INTO `users` (`ID`, `name`) VALUES (?, ?)");
    }

    #[test]
    fn insert_many() {
        let rs = vec![
            record!["a" => 1, "b" => "x"],
            record!["a" => 2, "b" => "y"],
        ];
        let stmt = SqlBuilder.insert_many("t", &rs).unwrap();

        assert_eq!(stmt.sql, "INSERT INTO `t` (`a`, `b`) VALUES (?, ?), (?, ?)");
        assert_eq!(stmt.values.len(), 4);

        let rs = vec![record!["a" => 1, "b" => "x"], record!["b" => "y", "a" => 2]];
        assert!(SqlBuilder.insert_many("t", &rs).is_err());
    }

    #[test]
    fn insert_without_data() {
        assert!(matches!(
            SqlBuilder.insert("t", &Record::new()),
            Err(SqlError::NoData)
        ));
        assert!(matches!(
            SqlBuilder.insert_many("t", &[]),
            Err(SqlError::NoData)
        ));
        assert!(matches!(
            SqlBuilder.insert("", &record!["a" => 1]),
            Err(SqlError::NoTable)
        ));
    }

    #[test]
    fn update() {
        let update = sql_adt::Update::new("users", record!["name" => "Ann", "age" => 40])
            .filter(&xpr!([xpr!("ID", "=", 7)]));
        let stmt = SqlBuilder.update(&update).unwrap();

        assert_eq!(
            stmt.sql,
            "UPDATE `users` SET `name` = ?, `age` = ? WHERE `ID` = ?"
        );
        assert_eq!(stmt.values, vec![value!("Ann"), value!(40), value!(7)]);

        let empty = sql_adt::Update::new("users", Record::new());
        assert!(matches!(SqlBuilder.update(&empty), Err(SqlError::NoData)));
    }

    #[test]
    fn delete() {
        let delete = sql_adt::Delete::new("test").filter(&xpr!([
            xpr!("ord", "=", 15),
            xpr_or!(),
            xpr!("names", "=", "X")
        ]));
        let stmt = SqlBuilder.delete(&delete).unwrap();

        assert_eq!(stmt.sql, "DELETE FROM `test` WHERE `ord` = ? OR `names` = ?");
        assert_eq!(stmt.values, vec![value!(15), value!("X")]);

        let stmt = SqlBuilder.delete(&sql_adt::Delete::new("test")).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM `test`");
    }
}
