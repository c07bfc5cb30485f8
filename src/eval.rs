// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::ast::{ArrayItem, BinaryOp, Expr, UnaryOp, Value};
use crate::utils::scalar_str;

/// Fold a constant expression to its native value.
///
/// Returns `None` for anything that depends on state outside the literal:
/// variables, calls, constants, property/index fetches, interpolation,
/// and arithmetic that PHP would refuse at runtime (division by zero).
pub fn fold(expr: &Expr) -> Option<Value> {
    match expr {
        Expr::Null => Some(Value::Null),
        Expr::Bool(b) => Some(Value::Bool(*b)),
        Expr::Int(i) => Some(Value::Int(*i)),
        Expr::Float(f) => Some(Value::Float(*f)),
        Expr::String(s) => Some(Value::String(s.clone())),
        Expr::Array { items, .. } => fold_array(items),
        Expr::Unary { op, expr } => fold_unary(*op, expr),
        Expr::Binary { op, left, right } => fold_binary(*op, left, right),
        Expr::InterpString(_)
        | Expr::Variable(_)
        | Expr::Const(_)
        | Expr::ClassConst { .. }
        | Expr::Property { .. }
        | Expr::Index { .. }
        | Expr::Call { .. } => None,
    }
}

/// PHP array semantics: a literal without keys is a list; any key makes it
/// a map, with positional items taking the next free integer index.
fn fold_array(items: &[ArrayItem]) -> Option<Value> {
    if items.iter().all(|item| item.key.is_none()) {
        let mut list = Vec::with_capacity(items.len());
        for item in items {
            list.push(fold(&item.value)?);
        }
        return Some(Value::List(list));
    }

    let mut map = IndexMap::new();
    let mut next_index: i64 = 0;
    for item in items {
        let key = match &item.key {
            Some(key_expr) => {
                let folded = fold(key_expr)?;
                let (key, int_key) = array_key(&folded)?;
                if let Some(i) = int_key {
                    next_index = next_index.max(i + 1);
                }
                key
            }
            None => {
                let key = next_index.to_string();
                next_index += 1;
                key
            }
        };
        // duplicate keys: the last value wins, the first position sticks
        map.insert(key, fold(&item.value)?);
    }
    Some(Value::Map(map))
}

/// Normalize a folded key the way PHP does: integers and integer-like
/// strings collapse to the same key, bools and floats cast to int,
/// null to the empty string.
fn array_key(value: &Value) -> Option<(String, Option<i64>)> {
    match value {
        Value::Int(i) => Some((i.to_string(), Some(*i))),
        Value::String(s) => match int_like(s) {
            Some(i) => Some((i.to_string(), Some(i))),
            None => Some((s.clone(), None)),
        },
        Value::Bool(b) => {
            let i = if *b { 1 } else { 0 };
            Some((i.to_string(), Some(i)))
        }
        Value::Float(f) if f.is_finite() => {
            let i = *f as i64;
            Some((i.to_string(), Some(i)))
        }
        Value::Null => Some((String::new(), None)),
        _ => None,
    }
}

/// A string PHP would silently cast to an integer key: canonical decimal
/// form only, so "08" and "1.0" stay strings.
fn int_like(s: &str) -> Option<i64> {
    let i: i64 = s.parse().ok()?;
    if i.to_string() == s {
        Some(i)
    } else {
        None
    }
}

fn fold_unary(op: UnaryOp, expr: &Expr) -> Option<Value> {
    let value = fold(expr)?;
    match op {
        UnaryOp::Neg => match value {
            Value::Int(i) => Some(i.checked_neg().map_or(Value::Float(-(i as f64)), Value::Int)),
            Value::Float(f) => Some(Value::Float(-f)),
            _ => None,
        },
        UnaryOp::Plus => match value {
            Value::Int(_) | Value::Float(_) => Some(value),
            _ => None,
        },
        UnaryOp::Not => Some(Value::Bool(!truthy(&value))),
    }
}

/// PHP truthiness: empty string, "0", zero, null and the empty array are
/// false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !s.is_empty() && s != "0",
        Value::List(items) => !items.is_empty(),
        Value::Map(map) => !map.is_empty(),
    }
}

fn fold_binary(op: BinaryOp, left: &Expr, right: &Expr) -> Option<Value> {
    let left = fold(left)?;
    let right = fold(right)?;

    if op == BinaryOp::Concat {
        return Some(Value::String(format!(
            "{}{}",
            scalar_str(&left)?,
            scalar_str(&right)?
        )));
    }

    // Arithmetic folds only over real numbers; numeric strings and other
    // coercible scalars fall back to raw source instead.
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => int_arith(op, *a, *b),
        (Value::Int(a), Value::Float(b)) => float_arith(op, *a as f64, *b),
        (Value::Float(a), Value::Int(b)) => float_arith(op, *a, *b as f64),
        (Value::Float(a), Value::Float(b)) => float_arith(op, *a, *b),
        _ => None,
    }
}

fn int_arith(op: BinaryOp, a: i64, b: i64) -> Option<Value> {
    match op {
        BinaryOp::Add => Some(a.checked_add(b).map_or(Value::Float(a as f64 + b as f64), Value::Int)),
        BinaryOp::Sub => Some(a.checked_sub(b).map_or(Value::Float(a as f64 - b as f64), Value::Int)),
        BinaryOp::Mul => Some(a.checked_mul(b).map_or(Value::Float(a as f64 * b as f64), Value::Int)),
        BinaryOp::Div => {
            if b == 0 {
                None
            } else if a % b == 0 {
                Some(Value::Int(a / b))
            } else {
                Some(Value::Float(a as f64 / b as f64))
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                None
            } else {
                Some(Value::Int(a % b))
            }
        }
        BinaryOp::Pow => {
            if b >= 0 {
                let exp = u32::try_from(b).ok()?;
                Some(
                    a.checked_pow(exp)
                        .map_or(Value::Float((a as f64).powf(b as f64)), Value::Int),
                )
            } else {
                Some(Value::Float((a as f64).powf(b as f64)))
            }
        }
        BinaryOp::Concat => unreachable!(),
    }
}

fn float_arith(op: BinaryOp, a: f64, b: f64) -> Option<Value> {
    match op {
        BinaryOp::Add => Some(Value::Float(a + b)),
        BinaryOp::Sub => Some(Value::Float(a - b)),
        BinaryOp::Mul => Some(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                None
            } else {
                Some(Value::Float(a / b))
            }
        }
        BinaryOp::Mod => None,
        BinaryOp::Pow => Some(Value::Float(a.powf(b))),
        BinaryOp::Concat => unreachable!(),
    }
}

// -- Tests --
