// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::ast::{ArrayItem, Expr, Value};
use crate::PatchError;

/// Infer the PHP expression for a native value. Synthesized arrays use
/// the short `[...]` syntax.
pub(super) fn value_to_expr(value: &Value) -> Expr {
    match value {
        Value::Null => Expr::Null,
        Value::Bool(b) => Expr::Bool(*b),
        Value::Int(i) => Expr::Int(*i),
        Value::Float(f) => Expr::Float(*f),
        Value::String(s) => Expr::String(s.clone()),
        Value::List(items) => Expr::Array {
            items: items
                .iter()
                .map(|v| ArrayItem {
                    key: None,
                    value: value_to_expr(v),
                })
                .collect(),
            long_syntax: false,
        },
        Value::Map(map) => Expr::Array {
            items: map
                .iter()
                .map(|(k, v)| ArrayItem {
                    key: Some(Expr::String(k.clone())),
                    value: value_to_expr(v),
                })
                .collect(),
            long_syntax: false,
        },
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
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

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
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

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::String).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl TryFrom<Value> for String {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(PatchError::TypeError {
                message: format!("Expected string, got {:?}", value),
                hint: Some("Use a string value in your config".into()),
                code: Some(401),
            }),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(PatchError::TypeError {
                message: format!("Expected boolean, got {:?}", value),
                hint: Some("Use true or false in your config".into()),
                code: Some(403),
            }),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            _ => Err(PatchError::TypeError {
                message: format!("Expected integer, got {:?}", value),
                hint: Some("Use an integer value in your config".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            _ => Err(PatchError::TypeError {
                message: format!("Expected number, got {:?}", value),
                hint: Some("Use a number value in your config".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for u16 {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) if (0..=u16::MAX as i64).contains(&i) => Ok(i as u16),
            Value::Int(i) => Err(PatchError::TypeError {
                message: format!("Number {} out of range for u16", i),
                hint: Some("Use a number between 0 and 65535".into()),
                code: Some(407),
            }),
            _ => Err(PatchError::TypeError {
                message: format!("Expected integer, got {:?}", value),
                hint: Some("Use an integer value in your config".into()),
                code: Some(402),
            }),
        }
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(String::try_from).collect(),
            _ => Err(PatchError::TypeError {
                message: format!("Expected list, got {:?}", value),
                hint: Some("Use an array value in your config".into()),
                code: Some(404),
            }),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, Value> {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(map) => Ok(map),
            _ => Err(PatchError::TypeError {
                message: format!("Expected keyed array, got {:?}", value),
                hint: Some("Use a keyed array value in your config".into()),
                code: Some(405),
            }),
        }
    }
}
