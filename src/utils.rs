use crate::ast::Value;

/// Format a float as PHP source so it re-parses as a float: always with a
/// decimal point or exponent.
pub fn float_source(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-INF".to_string() } else { "INF".to_string() };
    }
    let s = format!("{}", f);
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// A float the way PHP's string cast prints it: whole floats lose the
/// trailing `.0`, so `(string) 1.0` is `"1"`.
pub fn float_cast_str(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// PHP's string cast for scalars. Arrays have no useful cast and yield None.
pub fn scalar_str(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(float_cast_str(*f)),
        Value::String(s) => Some(s.clone()),
        Value::List(_) | Value::Map(_) => None,
    }
}
