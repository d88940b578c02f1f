//! Output sinks for the log facade.
//!
//! The facade owns filtering, the sticky error flag and `fatal`; a backend
//! only renders a record that already passed those checks.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::core::identity::timestamp;
use crate::log::Level;

/// One forwarded log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub level: Level,
    /// `"<env> <name>"`, or just the env when the logger has no name.
    pub label: &'a str,
    pub message: &'a str,
}

pub trait LogBackend {
    fn write(&self, record: &Record<'_>);
}

/// Backend constructed by `Log::new` when none is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Structured `tracing` events, rendered by the installed subscriber.
    #[default]
    Tracing,
    /// Plain text lines on stderr.
    Console,
}

/// Forwards records as `tracing` events with the label as the `logger` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl LogBackend for TracingBackend {
    fn write(&self, record: &Record<'_>) {
        let logger = record.label;
        let message = record.message;
        match record.level {
            Level::Trace => trace!(logger, "{message}"),
            Level::Debug => debug!(logger, "{message}"),
            Level::Info => info!(logger, "{message}"),
            Level::Warn => warn!(logger, "{message}"),
            Level::Error => error!(logger, "{message}"),
            Level::Fatal => error!(logger, fatal = true, "{message}"),
        }
    }
}

/// Plain text on stderr: `[<timestamp>] <LEVEL> <label>: <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBackend {
    timestamps: bool,
}

impl ConsoleBackend {
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }

    pub fn render(&self, record: &Record<'_>) -> String {
        let mut line = String::new();
        if self.timestamps {
            line.push_str(&format!("[{}] ", timestamp()));
        }
        line.push_str(&record.level.as_str().to_ascii_uppercase());
        if !record.label.is_empty() {
            line.push(' ');
            line.push_str(record.label);
            line.push(':');
        }
        line.push(' ');
        line.push_str(record.message);
        line
    }
}

impl LogBackend for ConsoleBackend {
    fn write(&self, record: &Record<'_>) {
        let line = self.render(record);
        // A failed diagnostic write has nowhere better to go.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

/// Owned copy of a [`Record`] kept by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub label: String,
    pub message: String,
}

/// Keeps every record in memory. Clones share the same buffer, so a caller
/// can hand one clone to `Log` and inspect records through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Rc<RefCell<Vec<LogRecord>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl LogBackend for MemoryBackend {
    fn write(&self, record: &Record<'_>) {
        self.records.borrow_mut().push(LogRecord {
            level: record.level,
            label: record.label.to_string(),
            message: record.message.to_string(),
        });
    }
}
