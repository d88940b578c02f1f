//! Toolkit configuration, optionally stored as `corebox.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreboxError;
use crate::io::fs::{path_base, save};
use crate::log::{BackendKind, Level};

/// Toolkit configuration (TOML).
///
/// Every field has a default so an empty or missing file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoreboxConfig {
    pub log: LogConfig,
    pub event: EventConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Logger name, appended to the environment name in the label.
    pub name: String,

    /// Minimum severity forwarded for `trace`..`warn`.
    pub level: Level,

    /// Keep rendered error messages, readable via `Log::errors`.
    pub history: bool,

    /// Prefix console lines with a timestamp. Console backend only.
    pub timestamps: bool,

    pub backend: BackendKind,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: Level::Info,
            history: false,
            timestamps: false,
            backend: BackendKind::Tracing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EventConfig {
    /// Advisory per-event listener ceiling; `0` disables the warning.
    pub max_listeners: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { max_listeners: 10 }
    }
}

impl CoreboxConfig {
    pub fn validate(&self) -> Result<(), CoreboxError> {
        self.log.validate()
    }
}

impl LogConfig {
    pub fn validate(&self) -> Result<(), CoreboxError> {
        if self.name.contains('\n') {
            return Err(CoreboxError::InvalidConfig(
                "log.name must be a single line".to_string(),
            ));
        }
        if self.timestamps && self.backend != BackendKind::Console {
            return Err(CoreboxError::ConflictingOptions {
                first: "log.timestamps",
                second: "log.backend = \"tracing\"",
            });
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CoreboxConfig::default()`.
pub fn load_config(path: &Path) -> Result<CoreboxConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        return Ok(CoreboxConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CoreboxConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Write `cfg` as TOML next to `path`, then rename it into place so readers
/// never see a half-written file.
pub fn write_config(path: &Path, cfg: &CoreboxConfig) -> Result<()> {
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    let rendered = toml::to_string_pretty(cfg).context("render config toml")?;
    let staging = staging_path(path);
    save(&staging, &format!("{rendered}\n"))?;
    fs::rename(&staging, path)
        .with_context(|| format!("move {} to {}", staging.display(), path.display()))?;
    debug!(path = %path.display(), "config written");
    Ok(())
}

/// `dir/.corebox.toml.tmp` for `dir/corebox.toml`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path_base(path, true).unwrap_or_else(|| "corebox.toml".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
