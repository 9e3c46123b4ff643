//! Sql Builder: dml query

use sea_query::{Order as SOrder, Query};

use super::{column_alias, column_builder, filter_builder, sql_adt, statement, table_ref};
use crate::{DmlQuery, SqlBuilder, SqlResult};

impl DmlQuery for SqlBuilder {
    /// `SELECT <columns|*> FROM <table> [WHERE ..] [ORDER BY ..] [LIMIT n [OFFSET m]]`
    fn select(&self, select: &sql_adt::Select) -> SqlResult<sql_adt::SqlStatement> {
        let mut statement = Query::select();
        statement.from(table_ref(select.get_table())?);

        column_builder(&mut statement, select.get_columns())?;

        if let Some(flt) = select.get_filter() {
            filter_builder(&mut statement, flt)?;
        }

        if let Some(orders) = select.get_order() {
            for o in orders {
                match o {
                    sql_adt::Order::Asc(name) => {
                        statement.order_by(column_alias(name)?, SOrder::Asc);
                    }
                    sql_adt::Order::Desc(name) => {
                        statement.order_by(column_alias(name)?, SOrder::Desc);
                    }
                }
            }
        }

        if let Some(limit) = select.limit {
            statement.limit(limit);
        }

        if let Some(offset) = select.offset {
            statement.offset(offset);
        }

        Ok(statement!(query: statement))
    }
}
