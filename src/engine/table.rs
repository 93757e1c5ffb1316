//! Statically built lookup from `(state, event)` to ordered candidates.

use crate::core::{Event, MachineHistory, State};
use crate::engine::transition::Transition;
use std::collections::HashMap;

/// Ordered transition table for one machine type.
///
/// Built once from a rule list and shared by every instance of the machine.
/// Each `(state, event)` key maps to the indices of its candidate rules in
/// declaration order.
#[derive(Clone, Debug)]
pub struct TransitionTable<S, E> {
    rules: Vec<Transition<S, E>>,
    index: HashMap<(S, E), Vec<usize>>,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    /// Index a rule list.
    ///
    /// Prefer `TableBuilder`, which validates the rules first.
    pub fn new(rules: Vec<Transition<S, E>>) -> Self {
        let mut index: HashMap<(S, E), Vec<usize>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            for source in rule.sources.states() {
                index.entry((source, rule.event)).or_default().push(position);
            }
        }
        Self { rules, index }
    }

    /// Candidates for `(state, event)` in declaration order.
    pub fn candidates(&self, state: S, event: E) -> impl Iterator<Item = &Transition<S, E>> + '_ {
        self.index
            .get(&(state, event))
            .into_iter()
            .flatten()
            .map(move |&position| &self.rules[position])
    }

    /// Pick the winning target for `event` given the machine's history.
    ///
    /// Guards are evaluated in declaration order against the history's
    /// current state; the first unguarded or passing candidate wins.
    pub fn select(&self, history: &MachineHistory<S, E>, event: E) -> Option<S> {
        self.candidates(history.current(), event)
            .find(|candidate| candidate.permits(history))
            .map(|candidate| candidate.target)
    }

    /// Check whether any rule is keyed on `(state, event)`.
    pub fn covers(&self, state: S, event: E) -> bool {
        self.index.contains_key(&(state, event))
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> &[Transition<S, E>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
