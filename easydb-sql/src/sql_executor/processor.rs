//! Sql row processor

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use easydb_core::{Decimal, Record, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo};

use crate::SqlResult;

/// decoding strategy of a MySQL column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Bool,
    Int,
    UInt,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    DateTime,
    Json,
    Bytes,
    Null,
    Text,
}

impl ColumnKind {
    /// from the type name reported by `sqlx`, e.g. `INT UNSIGNED` or `VARCHAR`
    pub(crate) fn from_type_name(name: &str) -> Self {
        match name {
            "BOOLEAN" | "TINYINT(1)" => ColumnKind::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => ColumnKind::Int,
            n if n.ends_with(" UNSIGNED") => ColumnKind::UInt,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "DECIMAL" => ColumnKind::Decimal,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
            "JSON" => ColumnKind::Json,
            "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
            | "GEOMETRY" => ColumnKind::Bytes,
            "NULL" => ColumnKind::Null,
            _ => ColumnKind::Text,
        }
    }
}

/// SqlRowProcessor turns a `MySqlRow` into a `Record`
pub(crate) struct SqlRowProcessor {
    cache: Option<Vec<(String, ColumnKind)>>,
}

impl SqlRowProcessor {
    pub fn new() -> Self {
        SqlRowProcessor { cache: None }
    }

    /// since each row has the same columns, saving them in cache for future use
    fn caching(&mut self, row: &MySqlRow) -> &[(String, ColumnKind)] {
        self.cache.get_or_insert_with(|| {
            row.columns()
                .iter()
                .map(|c| {
                    (
                        c.name().to_owned(),
                        ColumnKind::from_type_name(c.type_info().name()),
                    )
                })
                .collect()
        })
    }

    /// converting a sql row into a `Record`
    pub fn process(&mut self, row: &MySqlRow) -> SqlResult<Record> {
        let columns = self.caching(row);
        let mut record = Record::with_capacity(columns.len());

        for (idx, (name, kind)) in columns.iter().enumerate() {
            record.insert(name.as_str(), extract_value(row, idx, *kind)?);
        }

        Ok(record)
    }
}

fn extract_value(row: &MySqlRow, idx: usize, kind: ColumnKind) -> SqlResult<Value> {
    let v = match kind {
        ColumnKind::Bool => Value::from(row.try_get::<Option<bool>, _>(idx)?),
        // integer decoding follows the wire width, so any signed width fits into i64
        ColumnKind::Int => Value::from(row.try_get_unchecked::<Option<i64>, _>(idx)?),
        ColumnKind::UInt => Value::from(row.try_get_unchecked::<Option<u64>, _>(idx)?),
        ColumnKind::Float => Value::from(row.try_get::<Option<f32>, _>(idx)?),
        ColumnKind::Double => Value::from(row.try_get::<Option<f64>, _>(idx)?),
        ColumnKind::Decimal => Value::from(row.try_get::<Option<Decimal>, _>(idx)?),
        ColumnKind::Date => Value::from(row.try_get::<Option<NaiveDate>, _>(idx)?),
        ColumnKind::Time => Value::from(row.try_get::<Option<NaiveTime>, _>(idx)?),
        ColumnKind::DateTime => Value::from(row.try_get::<Option<NaiveDateTime>, _>(idx)?),
        ColumnKind::Json => Value::from(row.try_get::<Option<serde_json::Value>, _>(idx)?),
        ColumnKind::Bytes => Value::from(row.try_get_unchecked::<Option<Vec<u8>>, _>(idx)?),
        ColumnKind::Null => Value::Null,
        ColumnKind::Text => match row.try_get::<Option<String>, _>(idx) {
            Ok(v) => Value::from(v),
            // ENUM/SET and unknown types come back as raw bytes
            Err(_) => match row.try_get_unchecked::<Option<Vec<u8>>, _>(idx)? {
                Some(b) => match String::from_utf8(b) {
                    Ok(s) => Value::String(s),
                    Err(e) => Value::Bytes(e.into_bytes()),
                },
                None => Value::Null,
            },
        },
    };

    Ok(v)
}
