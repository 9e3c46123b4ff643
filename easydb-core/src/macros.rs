//! Easydb core macros

/// Type conversion: standard type into Value. Used in `value.rs`.
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl From<i32> for Value {
///     fn from(v: i32) -> Self {
///         Value::I64(v as i64)
///     }
/// }
/// ```
macro_rules! impl_value_from {
    ($ftype:ty, $val_var:ident) => {
        impl From<$ftype> for $crate::Value {
            fn from(v: $ftype) -> Self {
                $crate::Value::$val_var(v)
            }
        }
    };
    ($ftype:ty, $val_var:ident, $cast:ty) => {
        impl From<$ftype> for $crate::Value {
            fn from(v: $ftype) -> Self {
                $crate::Value::$val_var(v as $cast)
            }
        }
    };
}

pub(crate) use impl_value_from;

/// Type conversion: Value into standard type. Used in `value.rs`.
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl TryFrom<Value> for Option<bool> {
///     type Error = CoreError;
///
///     fn try_from(value: Value) -> Result<Self, Self::Error> {
///         match value {
///             Value::Null => Ok(None),
///             Value::Bool(v) => Ok(Some(v)),
///             _ => Err(CoreError::new_conversion_error(&value, "Option<bool>")),
///         }
///     }
/// }
/// ```
macro_rules! impl_try_from_value {
    ($val_var:ident, Option<$ftype:ty>, $hint:expr) => {
        impl TryFrom<$crate::Value> for Option<$ftype> {
            type Error = $crate::CoreError;

            fn try_from(value: $crate::Value) -> Result<Self, Self::Error> {
                match value {
                    $crate::Value::Null => Ok(None),
                    $crate::Value::$val_var(v) => Ok(Some(v)),
                    _ => Err($crate::CoreError::new_conversion_error(&value, $hint)),
                }
            }
        }
    };
    ($val_var:ident, $ftype:ty, $hint:expr) => {
        impl TryFrom<$crate::Value> for $ftype {
            type Error = $crate::CoreError;

            fn try_from(value: $crate::Value) -> Result<Self, Self::Error> {
                match value {
                    $crate::Value::$val_var(v) => Ok(v),
                    _ => Err($crate::CoreError::new_conversion_error(&value, $hint)),
                }
            }
        }
    };
}

pub(crate) use impl_try_from_value;

/// value creation macro
#[macro_export]
macro_rules! value {
    ($val:expr) => {{
        $crate::Value::from($val)
    }};
}

/// record creation macro
///
/// ```rust
/// use easydb_core::{record, value};
///
/// let r = record!["name" => "Jacob", "age" => 31, "email" => None::<String>];
/// assert_eq!(r.get("age"), Some(&value!(31)));
/// assert_eq!(r.columns(), vec!["name", "age", "email"]);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $val:expr),+ $(,)*) => {{
        let mut r = $crate::Record::new();
        $(
            r.insert($key, $crate::Value::from($val));
        )+
        r
    }};
}

/// date creation macro
#[macro_export]
macro_rules! date {
    ($year:expr, $month:expr, $day:expr) => {
        $crate::chrono::NaiveDate::from_ymd_opt($year, $month, $day)
    };
}

/// time creation macro
#[macro_export]
macro_rules! time {
    ($hour:expr, $minute:expr, $second:expr) => {
        $crate::chrono::NaiveTime::from_hms_opt($hour, $minute, $second)
    };
}

/// datetime creation macro
#[macro_export]
macro_rules! datetime {
    ($year:expr, $month:expr, $day:expr, $hour:expr, $minute:expr, $second:expr) => {
        $crate::chrono::NaiveDate::from_ymd_opt($year, $month, $day)
            .and_then(|d| d.and_hms_opt($hour, $minute, $second))
    };
}
