//! Easydb SQL builder

pub mod builder;
pub mod interface;
pub mod macros;
pub mod mutation_ddl;
pub mod mutation_dml;
pub mod notation;
pub mod query_ddl;
pub mod query_dml;
pub mod sql_adt;

pub(crate) use builder::*;
pub(crate) use macros::{alias, statement, xpr_transit};
