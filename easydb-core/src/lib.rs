//! Easydb core
//!
//! Value model shared by the statement builder and the executor.

pub mod error;
pub(crate) mod macros;
pub mod record;
pub mod value;

pub(crate) use macros::*;
pub use error::*;
pub use record::*;
pub use value::*;

pub use chrono::{self, NaiveDate, NaiveDateTime, NaiveTime};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
