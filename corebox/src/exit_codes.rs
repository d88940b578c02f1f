//! Stable exit codes for the corebox CLI and the log facade.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid arguments, config or I/O errors.
pub const INVALID: i32 = 1;
/// `Log::fatal` terminated the process.
pub const FATAL: i32 = 1;
