//! Composition of the event, log and state facades into one handle.
//!
//! The facades never call each other; `Corebox` only owns them side by side
//! together with the environment name they were built for.

use crate::core::identity;
use crate::event::{Emitter, EventBus};
use crate::io::config::CoreboxConfig;
use crate::io::env::env_name;
use crate::log::{Log, Logger};
use crate::state::{State, StateStore};

#[derive(Debug)]
pub struct Corebox<E = Emitter, L = Log, S = State> {
    env: String,
    events: E,
    log: L,
    state: S,
}

impl<E, L, S> Corebox<E, L, S>
where
    E: EventBus,
    L: Logger,
    S: StateStore,
{
    pub fn new(env: impl Into<String>, events: E, log: L, state: S) -> Self {
        Self {
            env: env.into(),
            events,
            log,
            state,
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Fresh UUID v4.
    pub fn id(&self) -> String {
        identity::id()
    }
}

impl Corebox {
    /// Default facades configured from `config`, labeled with the current
    /// environment name.
    pub fn from_config(config: &CoreboxConfig) -> Self {
        Self::from_config_in(config, &env_name())
    }

    pub fn from_config_in(config: &CoreboxConfig, env: &str) -> Self {
        Self::new(
            env,
            Emitter::from_config(&config.event),
            Log::new(&config.log, env),
            State::new(),
        )
    }
}
