//! Leveled logger facade over a pluggable [`LogBackend`].
//!
//! Behavior owned by the facade, independent of the backend:
//!
//! - `trace`/`debug`/`info`/`warn` below the configured level are dropped
//!   without touching the backend.
//! - `error` always reaches the backend, sets a sticky "any error" flag and,
//!   when history is enabled, records the rendered message.
//! - `fatal` is `error` with a `FATAL` prefix followed by process exit
//!   through the injected [`ProcessExit`].
//!
//! Variadic payloads are expressed with `format_args!`, which implements
//! `Display`: `log.info(format_args!("{a} {b}"))`.

mod backend;
mod exit;
mod level;

use std::cell::{Cell, RefCell};
use std::fmt::{self, Display};

pub use backend::{
    BackendKind, ConsoleBackend, LogBackend, LogRecord, MemoryBackend, Record, TracingBackend,
};
pub use exit::{ProcessExit, StdExit};
pub use level::Level;

use crate::exit_codes;
use crate::io::config::LogConfig;

pub trait Logger {
    fn trace(&self, message: impl Display) -> &Self;
    fn debug(&self, message: impl Display) -> &Self;
    fn info(&self, message: impl Display) -> &Self;
    fn warn(&self, message: impl Display) -> &Self;

    /// Always forwarded; marks the logger as having seen an error.
    fn error(&self, message: impl Display) -> &Self;

    /// Log as an error with a `FATAL` prefix, then terminate the process.
    fn fatal(&self, message: impl Display) -> !;

    /// Sticky: true once any `error`/`fatal` call happened.
    fn any_error(&self) -> bool;

    /// Rendered error messages in call order; empty unless history is on.
    fn errors(&self) -> Vec<String>;
}

pub struct Log {
    env: String,
    name: String,
    label: String,
    level: Level,
    history: bool,
    backend: Box<dyn LogBackend>,
    exit: Box<dyn ProcessExit>,
    any_error: Cell<bool>,
    errors: RefCell<Vec<String>>,
}

impl Log {
    /// Build a logger with the backend selected by `config.backend`.
    pub fn new(config: &LogConfig, env: &str) -> Self {
        let backend: Box<dyn LogBackend> = match config.backend {
            BackendKind::Tracing => Box::new(TracingBackend),
            BackendKind::Console => Box::new(ConsoleBackend::new(config.timestamps)),
        };
        Self::with_backend(config, env, backend)
    }

    /// Build a logger writing to a caller-supplied backend.
    pub fn with_backend(config: &LogConfig, env: &str, backend: Box<dyn LogBackend>) -> Self {
        Self {
            env: env.to_string(),
            name: config.name.clone(),
            label: label_for(env, &config.name),
            level: config.level,
            history: config.history,
            backend,
            exit: Box::new(StdExit),
            any_error: Cell::new(false),
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Replace the process-exit hook used by [`Logger::fatal`].
    pub fn with_exit(mut self, exit: Box<dyn ProcessExit>) -> Self {
        self.exit = exit;
        self
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn filtered(&self, level: Level, message: impl Display) -> &Self {
        if self.enabled(level) {
            self.forward(level, &message.to_string());
        }
        self
    }

    fn forward(&self, level: Level, message: &str) {
        self.backend.write(&Record {
            level,
            label: &self.label,
            message,
        });
    }

    fn record_error(&self, level: Level, rendered: String) {
        self.any_error.set(true);
        self.forward(level, &rendered);
        if self.history {
            self.errors.borrow_mut().push(rendered);
        }
    }
}

impl Logger for Log {
    fn trace(&self, message: impl Display) -> &Self {
        self.filtered(Level::Trace, message)
    }

    fn debug(&self, message: impl Display) -> &Self {
        self.filtered(Level::Debug, message)
    }

    fn info(&self, message: impl Display) -> &Self {
        self.filtered(Level::Info, message)
    }

    fn warn(&self, message: impl Display) -> &Self {
        self.filtered(Level::Warn, message)
    }

    fn error(&self, message: impl Display) -> &Self {
        self.record_error(Level::Error, message.to_string());
        self
    }

    fn fatal(&self, message: impl Display) -> ! {
        self.record_error(Level::Fatal, format!("FATAL {message}"));
        self.exit.exit(exit_codes::FATAL)
    }

    fn any_error(&self) -> bool {
        self.any_error.get()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log")
            .field("label", &self.label)
            .field("level", &self.level)
            .field("history", &self.history)
            .field("any_error", &self.any_error.get())
            .finish_non_exhaustive()
    }
}

fn label_for(env: &str, name: &str) -> String {
    if name.is_empty() {
        env.to_string()
    } else {
        format!("{env} {name}")
    }
}
