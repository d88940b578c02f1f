use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreboxError;

/// Log severity, ordered from least to most severe.
///
/// Serializes as the lowercase name; deserializes through [`FromStr`], so
/// config files may use any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// `EnvFilter` directive showing this level and above. `tracing` has no
    /// fatal level, so fatal maps to `error`.
    pub fn tracing_directive(self) -> &'static str {
        match self {
            Level::Fatal => "error",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreboxError::InvalidLevel(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = CoreboxError;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}
