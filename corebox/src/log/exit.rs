//! Process termination hook used by `Log::fatal`.

/// Terminates the host process. Swappable so tests can observe `fatal`.
pub trait ProcessExit {
    fn exit(&self, code: i32) -> !;
}

/// Calls [`std::process::exit`]; no destructors or cleanup hooks run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdExit;

impl ProcessExit for StdExit {
    fn exit(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}
