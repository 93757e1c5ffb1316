//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, MachineHistory, State};
use crate::engine::{Sources, Transition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, E> {
    sources: Option<Sources<S>>,
    event: Option<E>,
    target: Option<S>,
    guard: Option<Guard<S, E>>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            sources: None,
            event: None,
            target: None,
            guard: None,
        }
    }

    /// Restrict the rule to the listed source states.
    pub fn from<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.sources = Some(Sources::Only(states.into_iter().collect()));
        self
    }

    /// Let the rule fire from any state.
    pub fn from_any(mut self) -> Self {
        self.sources = Some(Sources::Any);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<S, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&MachineHistory<S, E>, &S) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E>, BuildError> {
        let sources = self.sources.ok_or(BuildError::MissingSources)?;
        if matches!(&sources, Sources::Only(states) if states.is_empty()) {
            return Err(BuildError::EmptySources);
        }
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(Transition {
            sources,
            event,
            target,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
