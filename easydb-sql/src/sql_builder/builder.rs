//! Sql builder

use easydb_core::Value;
use sea_query::{
    Cond, ConditionExpression, ConditionalStatement, Expr, Func, IntoTableRef, SelectStatement,
    SimpleExpr, TableRef, Value as SValue, Values,
};

use super::{alias, sql_adt};
use crate::{SqlError, SqlResult};

// ================================================================================================
// SqlBuilder
// ================================================================================================

/// SqlBuilder
///
/// Generates MySQL statements. DML statements come out with `?` placeholders and their
/// parameters, DDL statements as plain strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlBuilder;

// ================================================================================================
// Identifiers
// ================================================================================================

/// table reference, `schema.table` is split into a schema-qualified reference
pub(crate) fn table_ref(name: &str) -> SqlResult<TableRef> {
    let name = name.trim();
    match name.split_once('.') {
        Some((schema, table)) => {
            let (schema, table) = (schema.trim(), table.trim());
            if schema.is_empty() || table.is_empty() {
                return Err(SqlError::NoTable);
            }
            Ok((alias!(schema), alias!(table)).into_table_ref())
        }
        None if name.is_empty() => Err(SqlError::NoTable),
        None => Ok(alias!(name).into_table_ref()),
    }
}

/// column alias, empty names are rejected
pub(crate) fn column_alias(name: &str) -> SqlResult<sea_query::Alias> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SqlError::NoData);
    }
    Ok(alias!(name))
}

// ================================================================================================
// Value conversion
// ================================================================================================

/// Type conversion: from Value to `sea-query` Value
pub(crate) fn from_value_to_svalue(value: &Value) -> SValue {
    match value {
        Value::Bool(v) => SValue::from(*v),
        Value::I64(v) => SValue::from(*v),
        Value::U64(v) => SValue::from(*v),
        Value::F64(v) => SValue::from(*v),
        Value::String(v) => SValue::from(v.clone()),
        Value::Bytes(v) => SValue::from(v.clone()),
        Value::Date(v) => SValue::from(*v),
        Value::Time(v) => SValue::from(*v),
        Value::DateTime(v) => SValue::from(*v),
        Value::Decimal(v) => SValue::from(*v),
        Value::Uuid(v) => SValue::from(*v),
        Value::Json(v) => SValue::from(v.clone()),
        // untyped null
        Value::Null => SValue::Bool(None),
    }
}

pub(crate) fn from_value_to_sexpr(value: &Value) -> SimpleExpr {
    SimpleExpr::Value(from_value_to_svalue(value))
}

/// Type conversion: from `sea-query` Value to Value
pub(crate) fn from_svalue_to_value(svalue: SValue) -> SqlResult<Value> {
    let v = match svalue {
        SValue::Bool(ov) => Value::from(ov),
        SValue::TinyInt(ov) => Value::from(ov),
        SValue::SmallInt(ov) => Value::from(ov),
        SValue::Int(ov) => Value::from(ov),
        SValue::BigInt(ov) => Value::from(ov),
        SValue::TinyUnsigned(ov) => Value::from(ov),
        SValue::SmallUnsigned(ov) => Value::from(ov),
        SValue::Unsigned(ov) => Value::from(ov),
        SValue::BigUnsigned(ov) => Value::from(ov),
        SValue::Float(ov) => Value::from(ov),
        SValue::Double(ov) => Value::from(ov),
        SValue::String(ov) => Value::from(ov.map(|v| *v)),
        SValue::Char(ov) => Value::from(ov.map(String::from)),
        SValue::Bytes(ov) => Value::from(ov.map(|v| *v)),
        SValue::Json(ov) => Value::from(ov.map(|v| *v)),
        SValue::ChronoDate(ov) => Value::from(ov.map(|v| *v)),
        SValue::ChronoTime(ov) => Value::from(ov.map(|v| *v)),
        SValue::ChronoDateTime(ov) => Value::from(ov.map(|v| *v)),
        SValue::Decimal(ov) => Value::from(ov.map(|v| *v)),
        SValue::Uuid(ov) => Value::from(ov.map(|v| *v)),
        v => {
            return Err(SqlError::new_common_error(format!(
                "unsupported sea-query value: {:?}",
                v
            )))
        }
    };

    Ok(v)
}

/// convert the parameters of a built statement
pub(crate) fn from_svalues(values: Values) -> SqlResult<Vec<Value>> {
    values.0.into_iter().map(from_svalue_to_value).collect()
}

// ================================================================================================
// FilterBuilder
// Select, Update, Delete
// ================================================================================================

/// RecursiveState
///
/// Used in `cond_builder`. Terms are collected into `AND` groups, an `OR` closes the current
/// group, and the groups are finally joined by `OR`.
#[derive(Default)]
struct RecursiveState {
    groups: Vec<Cond>,
    current: Option<Cond>,
    negate: bool,
}

impl RecursiveState {
    fn new() -> Self {
        RecursiveState::default()
    }

    fn set_negate(&mut self) {
        self.negate = !self.negate;
    }

    fn reset_negate(&mut self) {
        self.negate = false;
    }

    fn close_group(&mut self) {
        if let Some(c) = self.current.take() {
            self.groups.push(c);
        }
    }

    fn add<C: Into<ConditionExpression>>(&mut self, cond: C) {
        self.current = Some(match self.current.take() {
            Some(c) => c.add(cond),
            None => Cond::all().add(cond),
        });
    }

    fn finish(mut self) -> Option<Cond> {
        self.close_group();
        let mut groups = self.groups;
        match groups.len() {
            0 => None,
            1 => groups.pop(),
            _ => Some(groups.into_iter().fold(Cond::any(), |acc, c| acc.add(c))),
        }
    }
}

/// A general function to build the `WHERE` clause of select, update and delete statements
pub(crate) fn filter_builder<S>(s: &mut S, flt: &sql_adt::Expressions) -> SqlResult<()>
where
    S: ConditionalStatement,
{
    if let Some(c) = cond_builder(flt.expressions())? {
        s.cond_where(c);
    }

    Ok(())
}

/// condition builder
fn cond_builder(flt: &[sql_adt::Expression]) -> SqlResult<Option<Cond>> {
    let mut state = RecursiveState::new();

    for e in flt {
        match e {
            sql_adt::Expression::Conjunction(sql_adt::Conjunction::AND) => {}
            sql_adt::Expression::Conjunction(sql_adt::Conjunction::OR) => state.close_group(),
            sql_adt::Expression::Opposition(_) => state.set_negate(),
            sql_adt::Expression::Simple(s) => {
                let expr = simple_expr(s)?;
                if state.negate {
                    state.add(Cond::all().not().add(expr));
                } else {
                    state.add(expr);
                }
                state.reset_negate();
            }
            sql_adt::Expression::Nest(n) => {
                // an empty group contributes nothing
                if let Some(c) = cond_builder(n)? {
                    if state.negate {
                        state.add(c.not());
                    } else {
                        state.add(c);
                    }
                }
                state.reset_negate();
            }
        }
    }

    Ok(state.finish())
}

fn simple_expr(s: &sql_adt::Condition) -> SqlResult<SimpleExpr> {
    let expr = Expr::col(column_alias(s.column_name())?);
    let expr = match s.equation() {
        sql_adt::Equation::Equal(Value::Null) => expr.is_null(),
        sql_adt::Equation::NotEqual(Value::Null) => expr.is_not_null(),
        sql_adt::Equation::Equal(v) => expr.eq(from_value_to_sexpr(v)),
        sql_adt::Equation::NotEqual(v) => expr.ne(from_value_to_sexpr(v)),
        sql_adt::Equation::Greater(v) => expr.gt(from_value_to_sexpr(v)),
        sql_adt::Equation::GreaterEqual(v) => expr.gte(from_value_to_sexpr(v)),
        sql_adt::Equation::Less(v) => expr.lt(from_value_to_sexpr(v)),
        sql_adt::Equation::LessEqual(v) => expr.lte(from_value_to_sexpr(v)),
        sql_adt::Equation::In(v) => expr.is_in(v.iter().map(from_value_to_sexpr)),
        sql_adt::Equation::Between((lo, hi)) => {
            expr.between(from_value_to_sexpr(lo), from_value_to_sexpr(hi))
        }
        sql_adt::Equation::Like(v) => expr.like(v.as_str()),
        sql_adt::Equation::IsNull => expr.is_null(),
        sql_adt::Equation::IsNotNull => expr.is_not_null(),
    };

    Ok(expr)
}

// ================================================================================================
// ColumnBuilder
// ================================================================================================

/// column_builder, an empty column list selects `*`
pub(crate) fn column_builder(
    statement: &mut SelectStatement,
    columns: &[sql_adt::Column],
) -> SqlResult<()> {
    if columns.is_empty() {
        statement.column(sea_query::Asterisk);
        return Ok(());
    }

    for column in columns {
        let col = Expr::col(column_alias(column.name())?);
        match column.function() {
            None => {
                statement.expr(col);
            }
            Some(sql_adt::Function::Alias(a)) => {
                statement.expr_as(col, column_alias(a)?);
            }
            Some(sql_adt::Function::Max) => {
                statement.expr(Func::max(col));
            }
            Some(sql_adt::Function::Min) => {
                statement.expr(Func::min(col));
            }
            Some(sql_adt::Function::Sum) => {
                statement.expr(Func::sum(col));
            }
            Some(sql_adt::Function::Avg) => {
                statement.expr(Func::avg(col));
            }
            Some(sql_adt::Function::Count) => {
                statement.expr(Func::count(col));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test_builder {
    use super::*;
    use easydb_core::{date, value};
    use sea_query::{MysqlQueryBuilder, Query};

    use crate::{record, xpr, xpr_and, xpr_not, xpr_or};

    fn where_of(flt: &sql_adt::Expressions) -> (String, Values) {
        let mut s = Query::select();
        s.column(sea_query::Asterisk).from(alias!("t"));
        filter_builder(&mut s, flt).unwrap();
        s.build(MysqlQueryBuilder)
    }

    #[test]
    fn svalue_conversion_keeps_values() {
        let values = vec![
            value!(true),
            value!(42),
            value!(1.5),
            value!("D'Ruel"),
            value!(date!(2022, 1, 1)),
            value!(serde_json::json!({"k": [1, 2]})),
            Value::Null,
        ];

        let back = values
            .iter()
            .map(|v| from_svalue_to_value(from_value_to_svalue(v)))
            .collect::<SqlResult<Vec<_>>>()
            .unwrap();

        assert_eq!(back, values);
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        assert!(matches!(table_ref("  "), Err(SqlError::NoTable)));
        assert!(matches!(table_ref("db."), Err(SqlError::NoTable)));
        assert!(table_ref("db.users").is_ok());
        assert!(matches!(column_alias(""), Err(SqlError::NoData)));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let flt = xpr!([
            xpr!("a", "=", 1),
            xpr_and!(),
            xpr!("b", "=", 2),
            xpr_or!(),
            xpr!("c", "=", 3)
        ]);
        let (sql, values) = where_of(&flt);

        assert!(sql.contains("`a` = ? AND `b` = ?"));
        assert!(sql.ends_with(" OR `c` = ?"));
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn missing_and_redundant_conjunctions() {
        let flt = xpr!([
            xpr_or!(),
            xpr!("a", "=", 1),
            xpr!("b", ">", 2),
            xpr_and!(),
            xpr_and!(),
            xpr!("c", "<", 3),
            xpr_or!()
        ]);
        let (sql, _) = where_of(&flt);

        assert_eq!(
            sql,
            "SELECT * FROM `t` WHERE `a` = ? AND `b` > ? AND `c` < ?"
        );
    }

    #[test]
    fn nested_and_negated() {
        let flt = xpr!([
            xpr!("ord", "=", 15),
            xpr_or!(),
            xpr_not!(),
            xpr!([xpr!("name", "like", "X%"), xpr_and!(), xpr!("val", ">=", 10)])
        ]);
        let (sql, values) = where_of(&flt);

        assert!(sql.starts_with("SELECT * FROM `t` WHERE `ord` = ? OR "));
        assert!(sql.contains("NOT"));
        assert!(sql.contains("`name` LIKE ?"));
        assert!(sql.contains("`val` >= ?"));
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn negation_applies_to_the_next_term_only() {
        let flt = xpr!([
            xpr!("a", "=", 1),
            xpr_or!(),
            xpr_not!(),
            xpr!("b", "=", 2),
            xpr_and!(),
            xpr!("c", "=", 3)
        ]);
        let (sql, values) = where_of(&flt);

        assert_eq!(
            sql,
            "SELECT * FROM `t` WHERE `a` = ? OR ((NOT `b` = ?) AND `c` = ?)"
        );
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn notation_or_starts_a_new_group() {
        let flt = sql_adt::Expressions::from_record(&record!["a" => 1, "||b" => 2, "c" => 3])
            .unwrap();
        let (sql, values) = where_of(&flt);

        assert_eq!(
            sql,
            "SELECT * FROM `t` WHERE `a` = ? OR (`b` = ? AND `c` = ?)"
        );
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn null_equations_and_empty_filters() {
        let flt = xpr!([
            xpr!("deleted_at", "=", None::<i64>),
            xpr!("email", "is not null"),
            xpr!([])
        ]);
        let (sql, values) = where_of(&flt);

        assert_eq!(
            sql,
            "SELECT * FROM `t` WHERE `deleted_at` IS NULL AND `email` IS NOT NULL"
        );
        assert!(values.0.is_empty());

        let (sql, _) = where_of(&xpr!([]));
        assert_eq!(sql, "SELECT * FROM `t`");
    }

    #[test]
    fn in_and_between() {
        let flt = xpr!([
            xpr!("id", "in", [1, 2, 3]),
            xpr!("age", "between", [18, 30])
        ]);
        let (sql, values) = where_of(&flt);

        assert_eq!(
            sql,
            "SELECT * FROM `t` WHERE `id` IN (?, ?, ?) AND (`age` BETWEEN ? AND ?)"
        );
        assert_eq!(values.0.len(), 5);
    }
}
