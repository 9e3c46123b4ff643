//! easydb record
//!
//! This module contains the record struct, an ordered `column => value` map. A record is the
//! input of insert/update statements and the output of every fetched row.
//!
//! Methods:
//! 1. new
//! 1. insert
//! 1. get
//! 1. remove
//! 1. columns
//! 1. values
//! 1. iter
//! 1. from_json
//! 1. to_json

use std::fmt::Display;

use itertools::Itertools;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CoreResult, Value};

/// Ordered column/value pairs. Column order is insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    data: Vec<(String, Value)>,
}

impl Record {
    /// Record constructor
    pub fn new() -> Self {
        Record { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            data: Vec::with_capacity(capacity),
        }
    }

    /// set a column. An existing column keeps its position and gets the new value
    pub fn insert<K, V>(&mut self, column: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let column = column.into();
        let value = value.into();
        match self.data.iter_mut().find(|(k, _)| *k == column) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.data.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let pos = self.data.iter().position(|(k, _)| k == column)?;
        Some(self.data.remove(pos).1)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.data.iter().any(|(k, _)| k == column)
    }

    pub fn columns(&self) -> Vec<&str> {
        self.data.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn values(&self) -> Vec<&Value> {
        self.data.iter().map(|(_, v)| v).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// parse a JSON object, keeping the key order of the document
    pub fn from_json(s: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .data
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .join(", ");
        write!(f, "{{{}}}", s)
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Record::new();
        for (k, v) in iter {
            r.insert(k, v);
        }
        r
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (k, v) in &self.data {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map of column names to values")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut r = Record::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            r.insert(k, v);
        }
        Ok(r)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}
