//! Sql builder macros

/// statement macro
///
/// `query:` builds a parameterized DML statement into a `SqlStatement`,
/// `schema:` renders a DDL statement into a plain string.
macro_rules! statement {
    (query: $statement:expr) => {{
        let (sql, values) = $statement.build(sea_query::MysqlQueryBuilder);
        $crate::sql_adt::SqlStatement::new(sql, $crate::sql_builder::from_svalues(values)?)
    }};
    (schema: $statement:expr) => {{
        $statement.to_string(sea_query::MysqlQueryBuilder)
    }};
}

pub(crate) use statement;

/// sea query alias macro
macro_rules! alias {
    ($name:expr) => {
        sea_query::Alias::new($name)
    };
}

pub(crate) use alias;

/// expression state transition, used in `sql_adt.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl ExpressionTransit<Conjunction, ConjunctionState> for SimpleState {
///     fn append(self, state: Conjunction) -> ConjunctionState {
///         let mut stack = self.stack;
///         stack.push(Expression::from(state));
///         ConjunctionState { stack }
///     }
///
///     fn finish(self) -> Expressions {
///         Expressions(self.stack)
///     }
/// }
/// ```
macro_rules! xpr_transit {
    ($input:ident, $from:ident => $to:ident) => {
        impl ExpressionTransit<$input, $to> for $from {
            fn append(self, state: $input) -> $to {
                let mut stack = self.stack;
                stack.push(Expression::from(state));
                $to { stack }
            }

            fn finish(self) -> Expressions {
                Expressions(self.stack)
            }
        }
    };
}

pub(crate) use xpr_transit;

/// filter expression macro
///
/// ```rust
/// use easydb_sql::{xpr, xpr_and, xpr_not, xpr_or};
///
/// let filter = xpr!([
///     xpr!("age", ">=", 18),
///     xpr_and!(),
///     xpr_not!(),
///     xpr!([xpr!("name", "like", "A%"), xpr_or!(), xpr!("email", "is null")]),
/// ]);
///
/// assert_eq!(filter.expressions().len(), 4);
/// ```
#[macro_export]
macro_rules! xpr {
    ([$($xpr:expr),* $(,)*]) => {
        <$crate::sql_adt::Expressions as std::iter::FromIterator<$crate::sql_adt::Expression>>::from_iter(
            vec![$($crate::sql_adt::Expression::from($xpr)),*]
        )
    };
    ($column:expr, "=", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::Equal($crate::Value::from($value)))
    };
    ($column:expr, "!=", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::NotEqual($crate::Value::from($value)))
    };
    ($column:expr, "<>", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::NotEqual($crate::Value::from($value)))
    };
    ($column:expr, ">", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::Greater($crate::Value::from($value)))
    };
    ($column:expr, ">=", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::GreaterEqual($crate::Value::from($value)))
    };
    ($column:expr, "<", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::Less($crate::Value::from($value)))
    };
    ($column:expr, "<=", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::LessEqual($crate::Value::from($value)))
    };
    ($column:expr, "in", [$($value:expr),* $(,)*]) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::In(vec![$($crate::Value::from($value)),*]))
    };
    ($column:expr, "between", [$lo:expr, $hi:expr]) => {
        $crate::sql_adt::Condition::new(
            $column,
            $crate::sql_adt::Equation::Between(($crate::Value::from($lo), $crate::Value::from($hi))),
        )
    };
    ($column:expr, "like", $value:expr) => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::Like(String::from($value)))
    };
    ($column:expr, "is null") => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::IsNull)
    };
    ($column:expr, "is not null") => {
        $crate::sql_adt::Condition::new($column, $crate::sql_adt::Equation::IsNotNull)
    };
}

/// `AND` conjunction
#[macro_export]
macro_rules! xpr_and {
    () => {
        $crate::sql_adt::Conjunction::AND
    };
}

/// `OR` conjunction
#[macro_export]
macro_rules! xpr_or {
    () => {
        $crate::sql_adt::Conjunction::OR
    };
}

/// `NOT` opposition, negates the following condition or group
#[macro_export]
macro_rules! xpr_not {
    () => {
        $crate::sql_adt::Opposition::NOT
    };
}
