//! Frozen, shareable views of a mapping.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CoreboxError;

/// Read-only mapping handed out by the state container.
///
/// Clones share storage. Reads go through `Deref<Target = Map>`; there is no
/// path to `&mut Map`, and the mutating entry points always fail with
/// [`CoreboxError::Frozen`]. Use [`Snapshot::thaw`] to get an owned copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Arc<Map<String, Value>>);

/// Freeze `map` into a [`Snapshot`].
pub fn freeze(map: Map<String, Value>) -> Snapshot {
    Snapshot(Arc::new(map))
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Owned, mutable deep copy. The snapshot itself is unchanged.
    pub fn thaw(&self) -> Map<String, Value> {
        self.0.as_ref().clone()
    }

    /// Always fails: snapshots are not extensible.
    pub fn try_insert(&self, key: impl Into<String>, _value: Value) -> Result<(), CoreboxError> {
        Err(CoreboxError::Frozen { key: key.into() })
    }

    /// Always fails: snapshots cannot lose keys either.
    pub fn try_remove(&self, key: &str) -> Result<Value, CoreboxError> {
        Err(CoreboxError::Frozen {
            key: key.to_string(),
        })
    }

    /// True when both snapshots point at the same storage.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Snapshot {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        freeze(map)
    }
}

impl PartialEq<Value> for Snapshot {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(self.0.as_ref())
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::object;
    use serde_json::json;

    #[test]
    fn frozen_snapshot_rejects_new_keys() {
        let snapshot = freeze(object(json!({ "one": 1 })));
        let err = snapshot.try_insert("two", json!(2)).expect_err("frozen");
        assert_eq!(
            err,
            CoreboxError::Frozen {
                key: "two".to_string()
            }
        );
        assert!(err.to_string().contains("not extensible"));
        assert_eq!(snapshot, json!({ "one": 1 }));
    }

    #[test]
    fn frozen_snapshot_rejects_removal() {
        let snapshot = freeze(object(json!({ "one": 1 })));
        assert!(snapshot.try_remove("one").is_err());
        assert_eq!(snapshot.get("one"), Some(&json!(1)));
    }

    /// Thawing yields an editable copy without touching the snapshot.
    #[test]
    fn thaw_returns_independent_copy() {
        let snapshot = freeze(object(json!({ "one": 1 })));
        let mut thawed = snapshot.thaw();
        thawed.insert("two".to_string(), json!(2));

        assert_eq!(Value::Object(thawed), json!({ "one": 1, "two": 2 }));
        assert_eq!(snapshot, json!({ "one": 1 }));
    }

    #[test]
    fn clones_share_storage() {
        let snapshot = freeze(object(json!({ "one": 1 })));
        let copy = snapshot.clone();
        assert!(snapshot.ptr_eq(&copy));
        assert!(!snapshot.ptr_eq(&freeze(snapshot.thaw())));
    }

    #[test]
    fn serializes_as_plain_object() {
        let snapshot = freeze(object(json!({ "one": [1, 2] })));
        assert_eq!(
            serde_json::to_string(&snapshot).expect("json"),
            r#"{"one":[1,2]}"#
        );
    }
}
