//! Structural helpers over JSON-like mappings and collections.
//!
//! Every helper here is pure: inputs are borrowed and results are fresh
//! values the caller owns.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Deep copy of `source`, optionally restricted to `keys`.
///
/// Selected keys missing from `source` are copied as `null`, so the result
/// always carries exactly the requested keys.
pub fn clone(source: &Map<String, Value>, keys: Option<&[&str]>) -> Map<String, Value> {
    match keys {
        None => source.clone(),
        Some(keys) => keys
            .iter()
            .map(|key| {
                let value = source.get(*key).cloned().unwrap_or(Value::Null);
                ((*key).to_string(), value)
            })
            .collect(),
    }
}

/// Apply `f` to every value, keeping keys and their order.
pub fn mapobj<F>(source: &Map<String, Value>, mut f: F) -> Map<String, Value>
where
    F: FnMut(&Value) -> Value,
{
    source
        .iter()
        .map(|(key, value)| (key.clone(), f(value)))
        .collect()
}

/// True when any array element or object value satisfies `pred`.
///
/// Scalars have no members and always yield `false`.
pub fn some<F>(value: &Value, mut pred: F) -> bool
where
    F: FnMut(&Value) -> bool,
{
    match value {
        Value::Array(items) => items.iter().any(&mut pred),
        Value::Object(map) => map.values().any(&mut pred),
        _ => false,
    }
}

/// True when every array element or object value satisfies `pred`.
///
/// Empty collections are vacuously true; scalars yield `false`.
pub fn every<F>(value: &Value, mut pred: F) -> bool
where
    F: FnMut(&Value) -> bool,
{
    match value {
        Value::Array(items) => items.iter().all(&mut pred),
        Value::Object(map) => map.values().all(&mut pred),
        _ => false,
    }
}

/// Return a sorted copy of `items`; the input slice is not reordered.
pub fn sort<T, F>(items: &[T], cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(cmp);
    sorted
}

/// Ascending comparator preset for [`sort`].
pub fn sort_asc<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Descending comparator preset for [`sort`].
pub fn sort_desc<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    sort_asc(b, a)
}

/// Total order over JSON values, usable where `sort_asc` is not
/// (`Value` has no `PartialOrd`).
///
/// Values of different kinds order as null < bool < number < string < array
/// < object. Numbers compare numerically, strings by code point and arrays
/// element by element. Objects only compare by size.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(x, y)| compare_values(x, y))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ascending preset for sorting JSON values.
pub fn value_asc(a: &Value, b: &Value) -> Ordering {
    compare_values(a, b)
}

/// Descending preset for sorting JSON values.
pub fn value_desc(a: &Value, b: &Value) -> Ordering {
    compare_values(b, a)
}

/// Render `value` as JSON: compact, or indented by four spaces when `human`.
pub fn jsonify<T: Serialize + ?Sized>(value: &T, human: bool) -> serde_json::Result<String> {
    if !human {
        return serde_json::to_string(value);
    }
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
