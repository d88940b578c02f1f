//! Pure deep merge of JSON-like mappings.
//!
//! For every key present on both sides:
//! - two objects merge recursively,
//! - two arrays concatenate or get replaced, per [`ArrayMerge`],
//! - anything else takes the right-hand value.
//!
//! Keys present on one side only pass through unchanged. Inputs are never
//! mutated; the result shares no storage with them.

use serde_json::{Map, Value};

/// How arrays found under the same key on both sides are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMerge {
    /// Left elements followed by right elements.
    #[default]
    Concat,
    /// The right-hand array replaces the left one wholesale.
    Overwrite,
}

/// Deep merge with array concatenation.
pub fn merge(left: &Map<String, Value>, right: &Map<String, Value>) -> Map<String, Value> {
    merge_with(left, right, ArrayMerge::Concat)
}

/// Deep merge where arrays from `right` overwrite arrays from `left`.
pub fn merge_overwrite_arrays(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
) -> Map<String, Value> {
    merge_with(left, right, ArrayMerge::Overwrite)
}

pub fn merge_with(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    arrays: ArrayMerge,
) -> Map<String, Value> {
    let mut merged = left.clone();
    for (key, incoming) in right {
        let value = match merged.get(key) {
            Some(existing) => merge_values(existing, incoming, arrays),
            None => incoming.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

fn merge_values(existing: &Value, incoming: &Value, arrays: ArrayMerge) -> Value {
    match (existing, incoming) {
        (Value::Object(left), Value::Object(right)) => {
            Value::Object(merge_with(left, right, arrays))
        }
        (Value::Array(left), Value::Array(right)) if arrays == ArrayMerge::Concat => {
            Value::Array(left.iter().chain(right).cloned().collect())
        }
        _ => incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::object as map;
    use serde_json::json;

    #[test]
    fn concat_and_overwrite_differ_only_on_arrays() {
        let left = map(json!({ "a": 1, "b": [1, 2] }));
        let right = map(json!({ "b": [3], "c": 2 }));

        assert_eq!(
            Value::Object(merge_overwrite_arrays(&left, &right)),
            json!({ "a": 1, "b": [3], "c": 2 })
        );
        assert_eq!(
            Value::Object(merge(&left, &right)),
            json!({ "a": 1, "b": [1, 2, 3], "c": 2 })
        );
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let left = map(json!({ "db": { "host": "localhost", "port": 5432, "tags": ["a"] } }));
        let right = map(json!({ "db": { "port": 6543, "tags": ["b"] }, "debug": true }));

        assert_eq!(
            Value::Object(merge(&left, &right)),
            json!({ "db": { "host": "localhost", "port": 6543, "tags": ["a", "b"] }, "debug": true })
        );
        assert_eq!(
            Value::Object(merge_overwrite_arrays(&left, &right)),
            json!({ "db": { "host": "localhost", "port": 6543, "tags": ["b"] }, "debug": true })
        );
    }

    /// Mismatched shapes under the same key resolve to the right-hand value.
    #[test]
    fn right_side_wins_on_shape_mismatch() {
        let left = map(json!({ "a": { "x": 1 }, "b": [1], "c": "text" }));
        let right = map(json!({ "a": [1], "b": { "y": 2 }, "c": null }));

        assert_eq!(
            Value::Object(merge(&left, &right)),
            json!({ "a": [1], "b": { "y": 2 }, "c": null })
        );
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let left = map(json!({ "a": { "b": [1] } }));
        let right = map(json!({ "a": { "b": [2], "c": 3 } }));
        let left_before = left.clone();
        let right_before = right.clone();

        let _ = merge(&left, &right);
        let _ = merge_overwrite_arrays(&left, &right);

        assert_eq!(left, left_before);
        assert_eq!(right, right_before);
    }

    #[test]
    fn empty_sides_pass_the_other_through() {
        let populated = map(json!({ "a": 1, "b": [1] }));
        let empty = Map::new();

        assert_eq!(merge(&populated, &empty), populated);
        assert_eq!(merge(&empty, &populated), populated);
    }

    #[test]
    fn existing_keys_keep_their_position() {
        let left = map(json!({ "first": 1, "second": 2 }));
        let right = map(json!({ "third": 3, "first": 10 }));

        let keys: Vec<String> = merge(&left, &right).keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }
}
