//! Associative filter notation
//!
//! A filter written as a record: every key is a column name, optionally decorated with
//!
//! - a comparison prefix: `>=`, `<=`, `<>`, `>`, `<`, `=`, `!=` (none means `=`)
//! - `||`: join to the previous condition with `OR` instead of `AND`
//! - `(`: open a group before this condition
//! - `)`: close the current group after this condition
//!
//! ```rust
//! use easydb_sql::{record, sql_adt::Expressions};
//!
//! let flt = Expressions::from_record(&record![
//!     ">=age" => 18,
//!     "(||name" => "Mia",
//!     "||email)" => "mia@example.com",
//! ])
//! .unwrap();
//!
//! assert_eq!(flt.expressions().len(), 3);
//! ```

use easydb_core::{Record, Value};

use super::sql_adt::{Condition, Conjunction, Equation, Expression, Expressions};
use crate::{SqlError, SqlResult};

/// comparison prefixes, matched in this order
const SIGNS: [&str; 7] = [">=", "<=", "<>", ">", "<", "=", "!="];

#[derive(Debug, PartialEq, Eq)]
struct Sign {
    column: String,
    prefix: &'static str,
    open_bracket: bool,
    close_bracket: bool,
    or: bool,
}

fn check_sign(key: &str) -> Sign {
    let key = key.trim();
    let open_bracket = key.contains('(');
    let close_bracket = !open_bracket && key.contains(')');
    let or = key.contains("||");

    let stripped = key.replace(['(', ')'], "").replace("||", "");
    let stripped = stripped.trim();
    let (prefix, column) = SIGNS
        .iter()
        .find_map(|s| stripped.strip_prefix(s).map(|rest| (*s, rest)))
        .unwrap_or(("", stripped));

    Sign {
        column: column.trim().to_owned(),
        prefix,
        open_bracket,
        close_bracket,
        or,
    }
}

fn equation(prefix: &str, value: &Value) -> Equation {
    match (prefix, value) {
        ("" | "=", Value::Null) => Equation::IsNull,
        ("!=" | "<>", Value::Null) => Equation::IsNotNull,
        (">=", v) => Equation::GreaterEqual(v.clone()),
        ("<=", v) => Equation::LessEqual(v.clone()),
        ("!=" | "<>", v) => Equation::NotEqual(v.clone()),
        (">", v) => Equation::Greater(v.clone()),
        ("<", v) => Equation::Less(v.clone()),
        (_, v) => Equation::Equal(v.clone()),
    }
}

impl Expressions {
    /// build a filter from the associative notation, see the module documentation
    pub fn from_record(record: &Record) -> SqlResult<Self> {
        let mut stack: Vec<Vec<Expression>> = vec![vec![]];

        for (key, value) in record.iter() {
            let sign = check_sign(key);
            if sign.column.is_empty() {
                return Err(SqlError::new_invalid_filter(format!(
                    "empty column name in `{key}`"
                )));
            }

            let level = stack
                .last_mut()
                .ok_or_else(|| SqlError::new_invalid_filter("unbalanced brackets"))?;
            if !level.is_empty() {
                let conjunction = if sign.or {
                    Conjunction::OR
                } else {
                    Conjunction::AND
                };
                level.push(Expression::Conjunction(conjunction));
            }
            if sign.open_bracket {
                stack.push(vec![]);
            }

            let condition = Condition::new(sign.column, equation(sign.prefix, value));
            if let Some(level) = stack.last_mut() {
                level.push(Expression::Simple(condition));
            }

            if sign.close_bracket {
                if stack.len() < 2 {
                    return Err(SqlError::new_invalid_filter(format!(
                        "unbalanced brackets: `{key}` closes a group that was never opened"
                    )));
                }
                if let (Some(group), Some(parent)) = (stack.pop(), stack.last_mut()) {
                    parent.push(Expression::Nest(group));
                }
            }
        }

        if stack.len() != 1 {
            return Err(SqlError::new_invalid_filter(
                "unbalanced brackets: a group is never closed",
            ));
        }

        Ok(Expressions::new(stack.pop().unwrap_or_default()))
    }
}

impl TryFrom<&Record> for Expressions {
    type Error = SqlError;

    fn try_from(record: &Record) -> SqlResult<Self> {
        Expressions::from_record(record)
    }
}
