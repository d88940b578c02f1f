//! Typed errors raised by the toolkit's pure contracts.
//!
//! I/O and orchestration code wraps these in `anyhow::Error` with context.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreboxError {
    /// A frozen snapshot was asked to change.
    #[error("cannot add property {key}, object is not extensible")]
    Frozen { key: String },

    /// Two mutually exclusive options were requested together.
    #[error("{first} and {second} options can not be set together")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("unknown log level '{0}' (expected trace, debug, info, warn, error or fatal)")]
    InvalidLevel(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
