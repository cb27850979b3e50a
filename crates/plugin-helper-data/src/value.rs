//! Dynamic value tree.
//!
//! [`Value`] is the single currency of every store: scalars, ordered lists,
//! insertion-ordered maps and content-hashed sets. Accessors are fail-fast: a
//! wrong variant is an [`Error::TypeMismatch`], never a coercion.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::set::SchemaSet;

/// Ordered string-keyed map used for nested records.
pub type Map = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Set(SchemaSet),
}

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reports whether the value is its type's zero value.
    ///
    /// `null`, `""`, `0`, `0.0` and `false` are zero. Collections are never
    /// zero, even when empty: an explicitly empty list is a value.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Set(_) => false,
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::mismatch("string", other.kind())),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(Error::mismatch("int", other.kind())),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            other => Err(Error::mismatch("float", other.kind())),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::mismatch("bool", other.kind())),
        }
    }

    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(Error::mismatch("list", other.kind())),
        }
    }

    pub fn as_map(&self) -> Result<&Map> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(Error::mismatch("map", other.kind())),
        }
    }

    pub fn as_set(&self) -> Result<&SchemaSet> {
        match self {
            Value::Set(set) => Ok(set),
            other => Err(Error::mismatch("set", other.kind())),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::mismatch("string", other.kind())),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(Error::mismatch("list", other.kind())),
        }
    }

    pub fn into_map(self) -> Result<Map> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(Error::mismatch("map", other.kind())),
        }
    }

    pub fn into_set(self) -> Result<SchemaSet> {
        match self {
            Value::Set(set) => Ok(set),
            other => Err(Error::mismatch("set", other.kind())),
        }
    }

    /// Convert into a `serde_json` value. Sets become arrays in set order.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => items.iter().map(Value::to_json).collect(),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Set(set) => set.iter().map(Value::to_json).collect(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<SchemaSet> for Value {
    fn from(set: SchemaSet) -> Self {
        Value::Set(set)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Deterministic text form with sorted map keys; sets print as arrays.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
            Value::List(items) => write_seq(f, items.iter()),
            Value::Set(set) => write_seq(f, set.iter()),
            Value::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", serde_json::Value::from(key.as_str()), map[key])?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_seq<'a>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'a Value>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_values() {
        assert!(Value::Null.is_zero());
        assert!(Value::from("").is_zero());
        assert!(Value::from(0).is_zero());
        assert!(Value::from(0.0).is_zero());
        assert!(Value::from(false).is_zero());

        assert!(!Value::from("x").is_zero());
        assert!(!Value::from(1).is_zero());
        assert!(!Value::from(true).is_zero());
        assert!(!Value::List(vec![]).is_zero());
        assert!(!Value::Map(Map::new()).is_zero());
    }

    #[test]
    fn accessors_fail_fast() {
        let v = Value::from(123);
        assert_eq!(v.as_int().unwrap(), 123);
        let err = v.as_str().unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch { expected: "string", found: "int", .. }
        ));
        assert!(Value::List(vec![]).as_map().is_err());
    }

    #[test]
    fn from_json_numbers() {
        assert_eq!(Value::from(json!(123)), Value::Int(123));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(-7)), Value::Int(-7));
    }

    #[test]
    fn from_json_nested() {
        let v = Value::from(json!({"list": [{"foo": "bar"}]}));
        let list = v.as_map().unwrap()["list"].as_list().unwrap();
        assert_eq!(list[0].as_map().unwrap()["foo"], Value::from("bar"));
    }

    #[test]
    fn to_json_preserves_shape() {
        let doc = json!({"b": [1, true, null], "a": {"c": "d"}});
        assert_eq!(Value::from(doc.clone()).to_json(), doc);
    }

    #[test]
    fn display_sorts_keys() {
        let v = Value::from(json!({"b": 1, "a": ["x", 2.5]}));
        assert_eq!(v.to_string(), r#"{"a":["x",2.5],"b":1}"#);
    }

    #[test]
    fn option_into_value() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
