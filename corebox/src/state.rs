//! Immutable key/value state container.
//!
//! The held mapping is only ever exposed as a frozen [`Snapshot`]. Appends
//! build a new mapping with the array-overwrite merge and swap it in; older
//! snapshots held by callers keep their contents.

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::merge::merge_overwrite_arrays;
use crate::core::snapshot::{Snapshot, freeze};

/// Read/append/reset access to a frozen mapping.
pub trait StateStore {
    /// Current snapshot. Shares storage with the container.
    fn read(&self) -> Snapshot;

    /// Merge `partial` into the current state (arrays overwrite) and return
    /// the new snapshot. An empty `partial` is a plain read.
    fn append(&mut self, partial: &Map<String, Value>) -> Snapshot;

    /// Replace the state with an empty mapping.
    fn reset(&mut self) -> &mut Self;
}

#[derive(Debug, Clone, Default)]
pub struct State {
    current: Snapshot,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of `initial`; later changes to `initial` are not seen.
    pub fn with_initial(initial: &Map<String, Value>) -> Self {
        Self {
            current: freeze(initial.clone()),
        }
    }
}

impl StateStore for State {
    fn read(&self) -> Snapshot {
        self.current.clone()
    }

    fn append(&mut self, partial: &Map<String, Value>) -> Snapshot {
        if partial.is_empty() {
            return self.read();
        }
        let merged = merge_overwrite_arrays(&self.current, partial);
        debug!(
            appended_keys = partial.len(),
            total_keys = merged.len(),
            "state appended"
        );
        self.current = freeze(merged);
        self.read()
    }

    fn reset(&mut self) -> &mut Self {
        debug!("state reset");
        self.current = Snapshot::empty();
        self
    }
}
