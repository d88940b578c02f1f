//! Type predicates over JSON-like values.

use serde_json::Value;

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// True for any structured value: objects and arrays.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// True for plain objects only; arrays are rejected.
pub fn is_object_strong(value: &Value) -> bool {
    value.is_object()
}
