//! Small utility toolkit: value helpers plus event, log and state facades.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic helpers (predicates, collection
//!   helpers, deep merge, frozen snapshots, ids and timestamps).
//! - **[`io`]**: Side-effecting helpers (config files, environment, filesystem).
//!
//! The facades ([`event`], [`log`], [`state`]) are independent of each other
//! and are composed by [`toolkit::Corebox`] through plain constructor
//! injection.

pub mod core;
pub mod error;
pub mod event;
pub mod exit_codes;
pub mod io;
pub mod log;
pub mod logging;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod toolkit;

pub use error::CoreboxError;
