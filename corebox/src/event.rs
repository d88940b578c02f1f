//! Synchronous publish/subscribe facade.
//!
//! Dispatch is depth-first and single-threaded: `emit` runs every listener
//! registered for the event, in registration order, before returning. Each
//! dispatch iterates over a copy of the listener list, so handlers may
//! register, remove or emit re-entrantly.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::warn;

use crate::io::config::EventConfig;

/// Event callback. Identity (for [`EventBus::off`]) is the `Rc` allocation.
pub type Handler = Rc<dyn Fn(&[Value])>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&[Value]) + 'static,
{
    Rc::new(f)
}

pub trait EventBus {
    /// Register `handler` for `event`.
    fn on(&self, event: &str, handler: Handler) -> &Self;

    /// Register `handler` for the next `event` only.
    fn once(&self, event: &str, handler: Handler) -> &Self;

    /// Remove the most recent registration of `handler` for `event`.
    fn off(&self, event: &str, handler: &Handler) -> &Self;

    /// Invoke the listeners of `event` with `args`. Returns whether any ran.
    fn emit(&self, event: &str, args: &[Value]) -> bool;

    /// Handlers currently registered for `event`, in registration order.
    fn listeners(&self, event: &str) -> Vec<Handler>;
}

#[derive(Clone)]
struct Listener {
    handler: Handler,
    once: bool,
}

/// [`EventBus`] backed by an in-process registry.
///
/// Registering more than `max_listeners` handlers for one event logs a
/// warning once per event name; registration still succeeds. A ceiling of
/// `0` disables the check.
pub struct Emitter {
    registry: RefCell<HashMap<String, Vec<Listener>>>,
    max_listeners: Cell<usize>,
    warned: RefCell<HashSet<String>>,
}

impl Emitter {
    pub const DEFAULT_MAX_LISTENERS: usize = 10;

    pub fn new() -> Self {
        Self::with_max_listeners(Self::DEFAULT_MAX_LISTENERS)
    }

    pub fn with_max_listeners(max_listeners: usize) -> Self {
        Self {
            registry: RefCell::new(HashMap::new()),
            max_listeners: Cell::new(max_listeners),
            warned: RefCell::new(HashSet::new()),
        }
    }

    pub fn from_config(config: &EventConfig) -> Self {
        Self::with_max_listeners(config.max_listeners)
    }

    pub fn max_listeners(&self) -> usize {
        self.max_listeners.get()
    }

    pub fn set_max_listeners(&self, max_listeners: usize) -> &Self {
        self.max_listeners.set(max_listeners);
        self
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.borrow().get(event).map_or(0, Vec::len)
    }

    /// Names with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove_all_listeners(&self, event: &str) -> &Self {
        self.registry.borrow_mut().remove(event);
        self
    }

    fn add_listener(&self, event: &str, listener: Listener) {
        let count = {
            let mut registry = self.registry.borrow_mut();
            let listeners = registry.entry(event.to_string()).or_default();
            listeners.push(listener);
            listeners.len()
        };

        let max = self.max_listeners.get();
        if max > 0 && count > max && self.warned.borrow_mut().insert(event.to_string()) {
            warn!(
                event,
                count,
                max_listeners = max,
                "possible listener leak: listener count exceeds max_listeners"
            );
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.event_names())
            .field("max_listeners", &self.max_listeners.get())
            .finish()
    }
}

impl EventBus for Emitter {
    fn on(&self, event: &str, handler: Handler) -> &Self {
        self.add_listener(
            event,
            Listener {
                handler,
                once: false,
            },
        );
        self
    }

    fn once(&self, event: &str, handler: Handler) -> &Self {
        self.add_listener(
            event,
            Listener {
                handler,
                once: true,
            },
        );
        self
    }

    fn off(&self, event: &str, handler: &Handler) -> &Self {
        let mut registry = self.registry.borrow_mut();
        if let Some(listeners) = registry.get_mut(event) {
            if let Some(pos) = listeners
                .iter()
                .rposition(|listener| Rc::ptr_eq(&listener.handler, handler))
            {
                listeners.remove(pos);
            }
            if listeners.is_empty() {
                registry.remove(event);
            }
        }
        self
    }

    fn emit(&self, event: &str, args: &[Value]) -> bool {
        // The borrow must end before any handler runs.
        let dispatch: Vec<Listener> = {
            let mut registry = self.registry.borrow_mut();
            let Some(listeners) = registry.get_mut(event) else {
                return false;
            };
            let dispatch = listeners.clone();
            listeners.retain(|listener| !listener.once);
            if listeners.is_empty() {
                registry.remove(event);
            }
            dispatch
        };

        for listener in &dispatch {
            (listener.handler)(args);
        }
        !dispatch.is_empty()
    }

    fn listeners(&self, event: &str) -> Vec<Handler> {
        self.registry
            .borrow()
            .get(event)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|listener| Rc::clone(&listener.handler))
                    .collect()
            })
            .unwrap_or_default()
    }
}
