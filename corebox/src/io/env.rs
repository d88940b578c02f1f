//! Environment name used as the logger label prefix.
//!
//! Read once when a facade is constructed; nothing re-reads it later.

/// Variable holding the environment name.
pub const ENV_VAR: &str = "COREBOX_ENV";
/// Used when [`ENV_VAR`] is unset or blank.
pub const DEFAULT_ENV: &str = "development";

/// Current environment name from [`ENV_VAR`].
pub fn env_name() -> String {
    resolve_env_name(std::env::var(ENV_VAR).ok())
}

/// Pick the environment name from an optional raw value.
pub fn resolve_env_name(raw: Option<String>) -> String {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}
