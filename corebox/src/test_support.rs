//! Test-only helpers for building values and observing `fatal`.

use std::panic::{AssertUnwindSafe, catch_unwind, panic_any};

use serde_json::{Map, Value};

use crate::log::ProcessExit;

/// Unwrap a `json!` literal that must be an object.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Panic payload raised by [`PanicExit`] in place of terminating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRequested(pub i32);

/// Exit hook that unwinds instead of ending the test process.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicExit;

impl ProcessExit for PanicExit {
    fn exit(&self, code: i32) -> ! {
        panic_any(ExitRequested(code))
    }
}

/// Run `f`, which must end in a [`PanicExit`] exit, and return the exit code.
pub fn expect_exit<F: FnOnce()>(f: F) -> i32 {
    let payload = catch_unwind(AssertUnwindSafe(f)).expect_err("expected a process exit");
    match payload.downcast::<ExitRequested>() {
        Ok(exit) => exit.0,
        Err(_) => panic!("closure panicked without requesting an exit"),
    }
}
