/// Parameter Binding Module
///
/// Positional statement parameters are represented by [`ParamValue`], a
/// tagged variant covering every kind SQLite can store. Static Rust values
/// convert infallibly through `From`; values read from configuration files
/// convert through `TryFrom<toml::Value>` and may be rejected.

use crate::core::{AdapterError, Result};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

/// A single positional parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ParamValue {
    /// Name of the backend storage class this value binds as.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Null => "NULL",
            ParamValue::Integer(_) => "INTEGER",
            ParamValue::Real(_) => "REAL",
            ParamValue::Text(_) => "TEXT",
            ParamValue::Blob(_) => "BLOB",
        }
    }
}

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ParamValue::Null => ToSqlOutput::Owned(Value::Null),
            ParamValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            ParamValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            ParamValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            ParamValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

/// Booleans are stored as 0/1 integers, matching SQLite's own convention.
impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Integer(value as i64)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Real(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Real(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Blob(value)
    }
}

impl From<&[u8]> for ParamValue {
    fn from(value: &[u8]) -> Self {
        ParamValue::Blob(value.to_vec())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl TryFrom<toml::Value> for ParamValue {
    type Error = AdapterError;

    fn try_from(value: toml::Value) -> Result<Self> {
        match value {
            toml::Value::String(s) => Ok(ParamValue::Text(s)),
            toml::Value::Integer(i) => Ok(ParamValue::Integer(i)),
            toml::Value::Float(f) => Ok(ParamValue::Real(f)),
            toml::Value::Boolean(b) => Ok(b.into()),
            other => Err(AdapterError::UnsupportedType(other.type_str().to_string())),
        }
    }
}

/// Builds a positional parameter list from heterogeneous values.
///
/// ```
/// use sqlite_adapter::params;
/// let args = params![1, "two", 3.0];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::core::db::ParamValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::core::db::ParamValue::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(ParamValue::from(7), ParamValue::Integer(7));
        assert_eq!(ParamValue::from(true), ParamValue::Integer(1));
        assert_eq!(ParamValue::from(2.5f32), ParamValue::Real(2.5));
        assert_eq!(ParamValue::from("hi"), ParamValue::Text("hi".to_string()));
        assert_eq!(ParamValue::from(vec![1u8, 2]), ParamValue::Blob(vec![1, 2]));
        assert_eq!(ParamValue::from(None::<i64>), ParamValue::Null);
        assert_eq!(ParamValue::from(Some("x")), ParamValue::Text("x".to_string()));
    }

    #[test]
    fn test_toml_conversion() {
        let value: toml::Value = toml::from_str("v = 42").unwrap();
        let param = ParamValue::try_from(value["v"].clone()).unwrap();
        assert_eq!(param, ParamValue::Integer(42));

        let array = toml::Value::Array(vec![toml::Value::Integer(1)]);
        match ParamValue::try_from(array) {
            Err(AdapterError::UnsupportedType(kind)) => assert_eq!(kind, "array"),
            other => panic!("Expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_params_macro() {
        let args = crate::params![1, "a", None::<String>];
        assert_eq!(
            args,
            vec![
                ParamValue::Integer(1),
                ParamValue::Text("a".to_string()),
                ParamValue::Null
            ]
        );
        assert!(crate::params![].is_empty());
    }

    #[test]
    fn test_binds_every_kind() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let args = crate::params![1, 1.5, "t", vec![0u8], None::<i64>];
        let kinds: Vec<String> = conn
            .query_row(
                "SELECT typeof(?), typeof(?), typeof(?), typeof(?), typeof(?)",
                rusqlite::params_from_iter(args.iter()),
                |row| (0..5).map(|i| row.get(i)).collect(),
            )
            .unwrap();
        assert_eq!(kinds, vec!["integer", "real", "text", "blob", "null"]);
    }
}
