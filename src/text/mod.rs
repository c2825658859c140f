pub mod guid;

use serde_json::Value;
use smol_str::SmolStr;

/// Lookup key for case-insensitive field names.
pub fn fold_key(name: &str) -> SmolStr {
    if name.is_ascii() {
        if name.bytes().any(|byte| byte.is_ascii_uppercase()) {
            SmolStr::new(name.to_ascii_lowercase())
        } else {
            SmolStr::new(name)
        }
    } else {
        SmolStr::new(name.to_lowercase())
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Flattens a JSON value into the string form used by parameter and attribute maps.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Scalar text of a value; containers have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        other => Some(stringify_value(other)),
    }
}
