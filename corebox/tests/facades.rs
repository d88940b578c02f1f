//! Public-API checks for the facades as an embedding application sees them.

use std::cell::RefCell;
use std::rc::Rc;

use corebox::event::{Emitter, EventBus, handler};
use corebox::exit_codes;
use corebox::io::config::LogConfig;
use corebox::log::{Level, Log, Logger, MemoryBackend};
use corebox::state::{State, StateStore};
use corebox::test_support::{PanicExit, expect_exit, object};
use corebox::toolkit::Corebox;
use serde_json::json;

fn test_corebox(level: Level) -> (Corebox, MemoryBackend) {
    let backend = MemoryBackend::new();
    let config = LogConfig {
        name: "app".to_string(),
        level,
        history: true,
        ..LogConfig::default()
    };
    let log = Log::with_backend(&config, "test", Box::new(backend.clone()))
        .with_exit(Box::new(PanicExit));
    let corebox = Corebox::new("test", Emitter::new(), log, State::new());
    (corebox, backend)
}

#[test]
fn events_can_drive_logging_through_shared_handles() {
    let (corebox, backend) = test_corebox(Level::Debug);
    let app = Rc::new(corebox);
    let weak = Rc::downgrade(&app);

    app.events().on(
        "job.failed",
        handler(move |args| {
            if let Some(corebox) = weak.upgrade() {
                corebox.log().error(format_args!("job failed: {}", args[0]));
            }
        }),
    );
    app.events().emit("job.failed", &[json!("build")]);

    assert!(app.log().any_error());
    assert_eq!(app.log().errors(), vec![r#"job failed: "build""#]);
    assert_eq!(backend.records()[0].label, "test app");
}

#[test]
fn state_snapshots_outlive_resets() {
    let (mut corebox, _) = test_corebox(Level::Info);
    let kept = corebox
        .state_mut()
        .append(&object(json!({ "user": { "name": "ada", "roles": ["admin"] } })));
    corebox
        .state_mut()
        .append(&object(json!({ "user": { "roles": ["viewer"] } })));
    assert_eq!(
        corebox.state().read(),
        json!({ "user": { "name": "ada", "roles": ["viewer"] } })
    );

    corebox.state_mut().reset();
    assert!(corebox.state().read().is_empty());
    assert_eq!(kept, json!({ "user": { "name": "ada", "roles": ["admin"] } }));
    assert!(kept.try_insert("extra", json!(1)).is_err());
}

#[test]
fn fatal_from_a_handler_stops_dispatch() {
    let (corebox, backend) = test_corebox(Level::Info);
    let corebox = Rc::new(corebox);
    let calls = Rc::new(RefCell::new(0));

    let weak = Rc::downgrade(&corebox);
    corebox.events().on(
        "shutdown",
        handler(move |_| {
            if let Some(corebox) = weak.upgrade() {
                corebox.log().fatal("unrecoverable");
            }
        }),
    );
    let counter = Rc::clone(&calls);
    corebox
        .events()
        .on("shutdown", handler(move |_| *counter.borrow_mut() += 1));

    let code = expect_exit(|| {
        corebox.events().emit("shutdown", &[]);
    });
    assert_eq!(code, exit_codes::FATAL);
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(backend.messages(), vec!["FATAL unrecoverable"]);
}
