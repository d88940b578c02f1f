//! Diagnostics subscriber for the corebox binary.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: process-wide subscriber controlled by
//!   `RUST_LOG`, output to stderr. Internal diagnostics (listener ceiling
//!   warnings, config loading) land here.
//!
//! - **Log facade (`log`)**: per-instance level filtering, sticky error flag
//!   and `fatal`. Its default `TracingBackend` feeds records into this same
//!   subscriber. The binary derives the default directive from `log.level`
//!   in the config, so both filters agree unless `RUST_LOG` overrides them.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `default_directive` (e.g. `"warn"`) if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=corebox=debug cargo run -- demo
/// ```
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
