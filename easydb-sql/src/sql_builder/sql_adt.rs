//! Easydb SqlBuilder ADT

use serde::{Deserialize, Serialize};

use super::xpr_transit;
use crate::{Record, Value};

// ================================================================================================
// Order
// ================================================================================================

/// order type
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Order {
    Asc(String),
    Desc(String),
}

impl Order {
    pub fn name(&self) -> &str {
        match self {
            Order::Asc(name) => name,
            Order::Desc(name) => name,
        }
    }
}

// ================================================================================================
// Function
// ================================================================================================

/// Function
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Function {
    #[serde(rename = "alias")]
    Alias(String),
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "avg")]
    Avg,
    #[serde(rename = "count")]
    Count,
}

// ================================================================================================
// Column
// ================================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub function: Option<Function>,
}

impl Column {
    pub fn new<C: Into<String>>(column: C, function: Option<Function>) -> Self {
        Column {
            name: column.into(),
            function,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> Option<&Function> {
        self.function.as_ref()
    }
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column {
            name: s.to_string(),
            function: None,
        }
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column {
            name: s,
            function: None,
        }
    }
}

// ================================================================================================
// Expression & Expressions (filter)
// ================================================================================================

/// Conjunction: And/Or
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Conjunction {
    #[serde(rename = "and")]
    AND,
    #[serde(rename = "or")]
    OR,
}

/// Opposition: Not
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Opposition {
    #[serde(rename = "not")]
    NOT,
}

/// Equation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Equation {
    #[serde(rename = "=")]
    Equal(Value),
    #[serde(rename = "!=")]
    NotEqual(Value),
    #[serde(rename = ">")]
    Greater(Value),
    #[serde(rename = ">=")]
    GreaterEqual(Value),
    #[serde(rename = "<")]
    Less(Value),
    #[serde(rename = "<=")]
    LessEqual(Value),
    #[serde(rename = "in")]
    In(Vec<Value>),
    #[serde(rename = "between")]
    Between((Value, Value)),
    #[serde(rename = "%")]
    Like(String),
    #[serde(rename = "null")]
    IsNull,
    #[serde(rename = "notnull")]
    IsNotNull,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: Column,
    #[serde(flatten)]
    pub equation: Equation,
}

impl Condition {
    pub fn new<C: Into<Column>>(column: C, equation: Equation) -> Self {
        Condition {
            column: column.into(),
            equation,
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn column_name(&self) -> &str {
        self.column.name.as_str()
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }
}

/// Expression
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Expression {
    Conjunction(Conjunction),
    Opposition(Opposition),
    Simple(Condition),
    Nest(Vec<Expression>),
}

impl From<Expressions> for Expression {
    fn from(v: Expressions) -> Self {
        Expression::Nest(v.0)
    }
}

impl From<Opposition> for Expression {
    fn from(v: Opposition) -> Self {
        Expression::Opposition(v)
    }
}

impl From<Conjunction> for Expression {
    fn from(c: Conjunction) -> Self {
        Expression::Conjunction(c)
    }
}

impl From<Condition> for Expression {
    fn from(c: Condition) -> Self {
        Expression::Simple(c)
    }
}

/// Expressions
///
/// A flat sequence of conditions, conjunctions, negations and nested groups. Within one level
/// `AND` binds tighter than `OR`; a missing conjunction between two operands means `AND`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Expressions(pub(crate) Vec<Expression>);

impl Expressions {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Expressions(expressions)
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Expression> for Expressions {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Expressions(iter.into_iter().collect())
    }
}

// ================================================================================================
// Expression builder
// A finite state machine used for building expressions
// ================================================================================================

// Init
pub struct InitState;

// AND/OR
pub struct ConjunctionState {
    stack: Vec<Expression>,
}

// NOT
pub struct OppositionState {
    stack: Vec<Expression>,
}

// Simple expression
pub struct SimpleState {
    stack: Vec<Expression>,
}

// Nested expression
pub struct NestState {
    stack: Vec<Expression>,
}

// Trait represents transition from one state to another
pub trait ExpressionTransit<T, S> {
    fn append(self, state: T) -> S;

    fn finish(self) -> Expressions;
}

impl ExpressionTransit<Condition, SimpleState> for InitState {
    fn append(self, state: Condition) -> SimpleState {
        SimpleState {
            stack: vec![Expression::Simple(state)],
        }
    }

    fn finish(self) -> Expressions {
        Expressions::default()
    }
}

impl ExpressionTransit<Expressions, NestState> for InitState {
    fn append(self, state: Expressions) -> NestState {
        NestState {
            stack: vec![Expression::Nest(state.0)],
        }
    }

    fn finish(self) -> Expressions {
        Expressions::default()
    }
}

impl ExpressionTransit<Opposition, OppositionState> for InitState {
    fn append(self, state: Opposition) -> OppositionState {
        OppositionState {
            stack: vec![Expression::Opposition(state)],
        }
    }

    fn finish(self) -> Expressions {
        Expressions::default()
    }
}

// Simple -> Conjunction
xpr_transit!(Conjunction, SimpleState => ConjunctionState);

// Nest -> Conjunction
xpr_transit!(Conjunction, NestState => ConjunctionState);

// Opposite -> Simple
xpr_transit!(Condition, OppositionState => SimpleState);

// Opposite -> Nest
xpr_transit!(Expressions, OppositionState => NestState);

// Conjunction -> Opposition
xpr_transit!(Opposition, ConjunctionState => OppositionState);

// Conjunction -> Simple
xpr_transit!(Condition, ConjunctionState => SimpleState);

// Conjunction -> Nest
xpr_transit!(Expressions, ConjunctionState => NestState);

/// Expressions builder
///
/// Build a legal expression
pub struct ExpressionsBuilder;

impl ExpressionsBuilder {
    pub fn init() -> InitState {
        InitState
    }
}

// ================================================================================================
// Select
// ================================================================================================

/// Select statement. An empty column list selects `*`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub table: String,
    pub columns: Vec<Column>,
    pub filter: Option<Expressions>,
    pub order: Option<Vec<Order>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    pub fn new<T: Into<String>>(table: T) -> Self {
        Select {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn get_table(&self) -> &str {
        &self.table
    }

    pub fn get_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_filter(&self) -> Option<&Expressions> {
        self.filter.as_ref()
    }

    pub fn get_order(&self) -> Option<&[Order]> {
        self.order.as_deref()
    }

    pub fn columns_name(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_owned()).collect()
    }

    pub fn columns<T>(mut self, columns: &[T]) -> Self
    where
        Column: From<T>,
        T: Clone,
    {
        self.columns
            .extend(columns.iter().map(|c| Column::from(c.clone())));
        self
    }

    pub fn filter(mut self, filter: &Expressions) -> Self {
        self.filter = Some(filter.to_owned());
        self
    }

    pub fn order(mut self, order: &[Order]) -> Self {
        self.order = Some(order.to_owned());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

// ================================================================================================
// Update
// ================================================================================================

/// Update statement. Without a filter every row of the table is updated
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub set: Record,
    pub filter: Option<Expressions>,
}

impl Update {
    pub fn new<T: Into<String>>(table: T, set: Record) -> Self {
        Update {
            table: table.into(),
            set,
            filter: None,
        }
    }

    pub fn filter(mut self, filter: &Expressions) -> Self {
        self.filter = Some(filter.to_owned());
        self
    }
}

// ================================================================================================
// Delete
// ================================================================================================

/// Delete statement. Without a filter every row of the table is deleted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Option<Expressions>,
}

impl Delete {
    pub fn new<T: Into<String>>(table: T) -> Self {
        Delete {
            table: table.into(),
            filter: None,
        }
    }

    pub fn filter(mut self, filter: &Expressions) -> Self {
        self.filter = Some(filter.to_owned());
        self
    }
}

// ================================================================================================
// CreateTable
// ================================================================================================

/// Create table statement. Column types are inferred from the sample values in `fields`
///
/// - `defaults`: column default values, a missing or null entry means `NULL`
/// - `primary_key`: primary key column, always auto incremented
/// - `auto_increment`: further auto incremented columns
/// - `if_not_exists`: defaults to `true`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: String,
    pub fields: Record,
    #[serde(default)]
    pub defaults: Record,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub auto_increment: Vec<String>,
    #[serde(default = "default_if_not_exists")]
    pub if_not_exists: bool,
}

fn default_if_not_exists() -> bool {
    true
}

impl CreateTable {
    pub fn new<T: Into<String>>(table: T, fields: Record) -> Self {
        CreateTable {
            table: table.into(),
            fields,
            defaults: Record::new(),
            primary_key: None,
            auto_increment: vec![],
            if_not_exists: true,
        }
    }

    pub fn defaults(mut self, defaults: Record) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn primary_key<T: Into<String>>(mut self, column: T) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    pub fn auto_increment<T: Into<String>>(mut self, column: T) -> Self {
        self.auto_increment.push(column.into());
        self
    }

    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub(crate) fn is_auto_increment(&self, column: &str) -> bool {
        self.primary_key.as_deref() == Some(column) || self.auto_increment.iter().any(|c| c == column)
    }
}

// ================================================================================================
// SqlStatement
// ================================================================================================

/// A statement with `?` placeholders and its ordered parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

impl SqlStatement {
    pub fn new<T: Into<String>>(sql: T, values: Vec<Value>) -> Self {
        SqlStatement {
            sql: sql.into(),
            values,
        }
    }

    /// a statement without parameters
    pub fn raw<T: Into<String>>(sql: T) -> Self {
        SqlStatement::new(sql, vec![])
    }
}

impl std::fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}

// ================================================================================================
// ExecutionResult
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}
