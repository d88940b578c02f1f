//! Side-effecting helpers: config files, environment and filesystem.

pub mod config;
pub mod env;
pub mod fs;
