//! Deterministic, pure helpers shared by the facades.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! JSON-like values and return fresh outputs suitable for tests.

pub mod collection;
pub mod identity;
pub mod merge;
pub mod predicates;
pub mod snapshot;
