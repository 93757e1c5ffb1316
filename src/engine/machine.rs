//! State machine instance that dispatches events through a shared table.

use crate::core::{Event, MachineHistory, State};
use crate::engine::table::TransitionTable;
use crate::engine::transition::DispatchResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::trace;

/// One running machine: a current state, its history and the table it
/// dispatches through.
#[derive(Clone, Debug)]
pub struct StateMachine<S, E> {
    table: Arc<TransitionTable<S, E>>,
    current: S,
    history: MachineHistory<S, E>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a new machine in the set's initial state.
    pub fn new(table: Arc<TransitionTable<S, E>>) -> Self {
        let initial = S::initial();
        Self {
            table,
            current: initial,
            history: MachineHistory::new(initial),
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> S {
        self.current
    }

    /// Get machine history (pure)
    pub fn history(&self) -> &MachineHistory<S, E> {
        &self.history
    }

    pub fn table(&self) -> &TransitionTable<S, E> {
        &self.table
    }

    /// Dispatch one event.
    ///
    /// Unmatched `(state, event)` pairs and all-guards-failed cases are
    /// `Ignored` and leave the machine untouched. On success the state is
    /// updated and one history entry is appended, even when the target
    /// equals the current state.
    pub fn dispatch(&mut self, event: E, timestamp: DateTime<Utc>) -> DispatchResult<S> {
        let Some(target) = self.table.select(&self.history, event) else {
            trace!(state = self.current.name(), ?event, "no transition, event ignored");
            return DispatchResult::Ignored;
        };

        trace!(
            from = self.current.name(),
            to = target.name(),
            ?event,
            "transition applied"
        );
        self.current = target;
        self.history.record(event, target, timestamp);
        DispatchResult::Applied(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use crate::engine::transition::{Sources, Transition};
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Light {
        Dark,
        Lit,
        Blown,
    }

    impl State for Light {
        fn name(&self) -> &'static str {
            match self {
                Self::Dark => "dark",
                Self::Lit => "lit",
                Self::Blown => "blown",
            }
        }

        fn all() -> &'static [Self] {
            &[Self::Dark, Self::Lit, Self::Blown]
        }

        fn initial() -> Self {
            Self::Dark
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Switch {
        On,
        Off,
        Surge,
    }

    fn machine() -> StateMachine<Light, Switch> {
        let table = TransitionTable::new(vec![
            Transition {
                sources: Sources::Only(vec![Light::Dark, Light::Lit]),
                event: Switch::On,
                target: Light::Lit,
                guard: None,
            },
            Transition {
                sources: Sources::Only(vec![Light::Lit]),
                event: Switch::Off,
                target: Light::Dark,
                guard: None,
            },
            Transition {
                sources: Sources::Any,
                event: Switch::Surge,
                target: Light::Blown,
                guard: Some(Guard::new(|h: &MachineHistory<Light, Switch>, _| {
                    h.current() == Light::Lit
                })),
            },
        ]);
        StateMachine::new(Arc::new(table))
    }

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second).unwrap()
    }

    #[test]
    fn starts_in_initial_state() {
        let machine = machine();
        assert_eq!(machine.current_state(), Light::Dark);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn applied_transition_updates_state_and_history() {
        let mut machine = machine();

        let result = machine.dispatch(Switch::On, at(1));

        assert_eq!(result, DispatchResult::Applied(Light::Lit));
        assert_eq!(machine.current_state(), Light::Lit);
        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.history().entries()[1].timestamp, Some(at(1)));
    }

    #[test]
    fn self_transition_is_applied_and_recorded() {
        let mut machine = machine();
        machine.dispatch(Switch::On, at(1));

        let result = machine.dispatch(Switch::On, at(2));

        assert_eq!(result, DispatchResult::Applied(Light::Lit));
        assert_eq!(machine.history().path(), vec![Light::Dark, Light::Lit, Light::Lit]);
    }

    #[test]
    fn unmatched_event_is_ignored_without_history() {
        let mut machine = machine();

        let result = machine.dispatch(Switch::Off, at(1));

        assert_eq!(result, DispatchResult::Ignored);
        assert_eq!(machine.current_state(), Light::Dark);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn failing_guard_is_ignored() {
        let mut machine = machine();
        assert_eq!(machine.dispatch(Switch::Surge, at(1)), DispatchResult::Ignored);

        machine.dispatch(Switch::On, at(2));
        assert_eq!(
            machine.dispatch(Switch::Surge, at(3)),
            DispatchResult::Applied(Light::Blown)
        );
    }

    #[test]
    fn instances_sharing_a_table_are_independent() {
        let mut first = machine();
        let mut second = StateMachine::new(Arc::clone(&first.table));

        first.dispatch(Switch::On, at(1));
        second.dispatch(Switch::Off, at(1));

        assert_eq!(first.current_state(), Light::Lit);
        assert_eq!(second.current_state(), Light::Dark);
    }
}
