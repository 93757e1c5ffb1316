//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State};
use crate::engine::{Transition, TransitionTable};

/// Builder for assembling a machine type's rule list with a fluent API.
///
/// Rules keep the order they are added in; that order decides which
/// candidate wins when several share a `(state, event)` key.
pub struct TableBuilder<S, E> {
    transitions: Vec<Transition<S, E>>,
}

impl<S: State, E: Event> TableBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition<S, E>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Build the table.
    /// Returns an error if no rule was added.
    pub fn build(self) -> Result<TransitionTable<S, E>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }
        Ok(TransitionTable::new(self.transitions))
    }
}

impl<S: State, E: Event> Default for TableBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
