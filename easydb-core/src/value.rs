//! easydb value
//!
//! This module contains the value type, which is the atomic unit of data passed between
//! records, statement parameters and decoded rows.

use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::{impl_try_from_value, impl_value_from};

// ================================================================================================
// Value & ValueType
// ================================================================================================

/// Value is the fundamental element in easydb.
///
/// Integers are widened to `I64` (or `U64` for values that do not fit), floats to `F64`.
/// `Json` holds structured data which is bound as a JSON parameter, never as a plain string.
///
/// In JSON, types without a native JSON form are written as single-key objects
/// (`{"$date": "2022-01-01"}`), every other array or object is `Json`.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Decimal(Decimal),
    Uuid(Uuid),
    Null,
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn dtype(&self) -> ValueType {
        ValueType::from(self)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            Value::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "{:?}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Uuid(v) => write!(f, "{}", v),
            Value::Json(v) => write!(f, "{}", v),
            Value::Null => write!(f, "null"),
        }
    }
}

#[derive(PartialEq, Clone, Copy, Debug, Deserialize, Serialize, Eq, Hash, Default)]
pub enum ValueType {
    Bool,
    I64,
    U64,
    F64,
    String,
    Bytes,
    Date,
    Time,
    DateTime,
    Decimal,
    Uuid,
    Json,
    #[default]
    Null,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Null => write!(f, "null"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl From<&Value> for ValueType {
    fn from(v: &Value) -> Self {
        match v {
            Value::Bool(_) => ValueType::Bool,
            Value::I64(_) => ValueType::I64,
            Value::U64(_) => ValueType::U64,
            Value::F64(_) => ValueType::F64,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Date(_) => ValueType::Date,
            Value::Time(_) => ValueType::Time,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Uuid(_) => ValueType::Uuid,
            Value::Json(_) => ValueType::Json,
            Value::Null => ValueType::Null,
        }
    }
}

// ================================================================================================
// Serde
// ================================================================================================

const TAG_BYTES: &str = "$bytes";
const TAG_DATE: &str = "$date";
const TAG_TIME: &str = "$time";
const TAG_DATETIME: &str = "$datetime";
const TAG_DECIMAL: &str = "$decimal";
const TAG_UUID: &str = "$uuid";

fn serialize_tagged<S, T>(serializer: S, tag: &str, value: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, value)?;
    map.end()
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serialize_tagged(serializer, TAG_BYTES, v),
            Value::Date(v) => serialize_tagged(serializer, TAG_DATE, v),
            Value::Time(v) => serialize_tagged(serializer, TAG_TIME, v),
            Value::DateTime(v) => serialize_tagged(serializer, TAG_DATETIME, v),
            Value::Decimal(v) => serialize_tagged(serializer, TAG_DECIMAL, v),
            Value::Uuid(v) => serialize_tagged(serializer, TAG_UUID, v),
            Value::Json(v) => v.serialize(serializer),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a scalar, a tagged value, an array or an object")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(Value::String(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(Value::Bytes(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let v = serde_json::Value::deserialize(SeqAccessDeserializer::new(seq))?;
        Ok(Value::Json(v))
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let key = match access.next_key::<String>()? {
            Some(k) => k,
            None => return Ok(Value::Json(serde_json::Value::Object(Default::default()))),
        };

        let tagged = match key.as_str() {
            TAG_BYTES => Some(Value::Bytes(access.next_value()?)),
            TAG_DATE => Some(Value::Date(access.next_value()?)),
            TAG_TIME => Some(Value::Time(access.next_value()?)),
            TAG_DATETIME => Some(Value::DateTime(access.next_value()?)),
            TAG_DECIMAL => Some(Value::Decimal(access.next_value()?)),
            TAG_UUID => Some(Value::Uuid(access.next_value()?)),
            _ => None,
        };

        match tagged {
            Some(v) => match access.next_key::<String>()? {
                None => Ok(v),
                Some(k) => Err(serde::de::Error::custom(format!(
                    "unexpected key `{k}` after `{key}`"
                ))),
            },
            None => {
                let mut obj = serde_json::Map::new();
                obj.insert(key, access.next_value()?);
                let rest = serde_json::Map::deserialize(MapAccessDeserializer::new(access))?;
                obj.extend(rest);
                Ok(Value::Json(serde_json::Value::Object(obj)))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// ================================================================================================
// Conversions
// ================================================================================================

impl_value_from!(bool, Bool);
impl_value_from!(i8, I64, i64);
impl_value_from!(i16, I64, i64);
impl_value_from!(i32, I64, i64);
impl_value_from!(i64, I64);
impl_value_from!(u8, I64, i64);
impl_value_from!(u16, I64, i64);
impl_value_from!(u32, I64, i64);
impl_value_from!(f32, F64, f64);
impl_value_from!(f64, F64);
impl_value_from!(String, String);
impl_value_from!(Vec<u8>, Bytes);
impl_value_from!(NaiveDate, Date);
impl_value_from!(NaiveTime, Time);
impl_value_from!(NaiveDateTime, DateTime);
impl_value_from!(Decimal, Decimal);
impl_value_from!(Uuid, Uuid);
impl_value_from!(serde_json::Value, Json);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::I64(i),
            Err(_) => Value::U64(v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(ov: Option<T>) -> Self {
        match ov {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl_try_from_value!(Bool, bool, "bool");
impl_try_from_value!(Bool, Option<bool>, "Option<bool>");
impl_try_from_value!(I64, i64, "i64");
impl_try_from_value!(I64, Option<i64>, "Option<i64>");
impl_try_from_value!(U64, u64, "u64");
impl_try_from_value!(F64, f64, "f64");
impl_try_from_value!(F64, Option<f64>, "Option<f64>");
impl_try_from_value!(String, String, "String");
impl_try_from_value!(String, Option<String>, "Option<String>");
impl_try_from_value!(Bytes, Vec<u8>, "Vec<u8>");
impl_try_from_value!(Date, NaiveDate, "NaiveDate");
impl_try_from_value!(Time, NaiveTime, "NaiveTime");
impl_try_from_value!(DateTime, NaiveDateTime, "NaiveDateTime");
impl_try_from_value!(Decimal, Decimal, "Decimal");
impl_try_from_value!(Uuid, Uuid, "Uuid");
impl_try_from_value!(Json, serde_json::Value, "serde_json::Value");
