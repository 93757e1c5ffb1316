//! Transition rules: eligible sources, triggering event, target and an
//! optional guard.

use crate::core::{Guard, MachineHistory, State};
use serde::{Deserialize, Serialize};

/// Set of source states a rule may fire from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sources<S> {
    /// Every state of the set
    Any,
    /// Only the listed states
    Only(Vec<S>),
}

impl<S: State> Sources<S> {
    /// Check whether `state` is an eligible source.
    pub fn contains(&self, state: &S) -> bool {
        match self {
            Self::Any => true,
            Self::Only(states) => states.contains(state),
        }
    }

    /// Expand into the concrete list of eligible states.
    pub fn states(&self) -> Vec<S> {
        S::all()
            .iter()
            .copied()
            .filter(|state| self.contains(state))
            .collect()
    }
}

/// Outcome of dispatching one event to a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchResult<S> {
    /// A candidate won; the machine is now in this state
    Applied(S),
    /// No candidate matched the current state and event, or every guard failed
    Ignored,
}

impl<S: Copy> DispatchResult<S> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(&self) -> Option<S> {
        match self {
            Self::Applied(state) => Some(*state),
            Self::Ignored => None,
        }
    }
}

/// A candidate transition.
///
/// Candidates sharing a (source, event) pair are tried in declaration order;
/// the first without a guard, or whose guard passes, wins.
#[derive(Clone, Debug)]
pub struct Transition<S, E> {
    pub sources: Sources<S>,
    pub event: E,
    pub target: S,
    pub guard: Option<Guard<S, E>>,
}

impl<S: State, E: Copy + PartialEq> Transition<S, E> {
    /// Check whether this rule is keyed on `(current, event)`.
    pub fn matches(&self, current: &S, event: &E) -> bool {
        self.event == *event && self.sources.contains(current)
    }

    /// Evaluate the guard, if any, against the machine's history (pure).
    pub fn permits(&self, history: &MachineHistory<S, E>) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(history, &self.target))
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Valve {
        Shut,
        Open,
        Stuck,
    }

    impl State for Valve {
        fn name(&self) -> &'static str {
            match self {
                Self::Shut => "shut",
                Self::Open => "open",
                Self::Stuck => "stuck",
            }
        }

        fn all() -> &'static [Self] {
            &[Self::Shut, Self::Open, Self::Stuck]
        }

        fn initial() -> Self {
            Self::Shut
        }
    }

    #[test]
    fn matches_requires_source_and_event() {
        let transition: Transition<Valve, char> = Transition {
            sources: Sources::Only(vec![Valve::Shut]),
            event: 'o',
            target: Valve::Open,
            guard: None,
        };

        assert!(transition.matches(&Valve::Shut, &'o'));
        assert!(!transition.matches(&Valve::Open, &'o'));
        assert!(!transition.matches(&Valve::Shut, &'x'));
    }

    #[test]
    fn any_sources_expand_to_whole_set() {
        let sources: Sources<Valve> = Sources::Any;
        assert_eq!(sources.states(), vec![Valve::Shut, Valve::Open, Valve::Stuck]);

        let only = Sources::Only(vec![Valve::Stuck, Valve::Shut]);
        assert_eq!(only.states(), vec![Valve::Shut, Valve::Stuck]);
    }

    #[test]
    fn permits_respects_guard() {
        let guarded: Transition<Valve, char> = Transition {
            sources: Sources::Any,
            event: 'o',
            target: Valve::Open,
            guard: Some(Guard::new(|history: &MachineHistory<Valve, char>, _| {
                history.len() > 1
            })),
        };
        let mut history = MachineHistory::new(Valve::Shut);

        assert!(guarded.is_guarded());
        assert!(!guarded.permits(&history));

        history.record('s', Valve::Stuck, Utc::now());
        assert!(guarded.permits(&history));
    }

    #[test]
    fn dispatch_result_accessors() {
        assert!(DispatchResult::Applied(Valve::Open).is_applied());
        assert_eq!(DispatchResult::Applied(Valve::Open).applied(), Some(Valve::Open));
        assert_eq!(DispatchResult::<Valve>::Ignored.applied(), None);
    }
}
