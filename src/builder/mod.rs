//! Builder API for ergonomic transition table construction.
//!
//! This module provides fluent builders and macros for declaring machine
//! types with minimal boilerplate while keeping tables statically typed.

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::BuildError;
pub use table::TableBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, MachineHistory, State};
use crate::engine::{Sources, Transition};

/// Create an unconditional transition from the listed sources.
///
/// # Example
///
/// ```
/// use chargestate::builder::simple_transition;
/// use chargestate::state_enum;
///
/// state_enum! {
///     enum Relay {
///         Open => "open",
///         Closed => "closed",
///     }
///     initial: Open
/// }
///
/// let transition = simple_transition(vec![Relay::Open], 'c', Relay::Closed);
/// assert!(transition.matches(&Relay::Open, &'c'));
/// ```
pub fn simple_transition<S, E, I>(sources: I, event: E, target: S) -> Transition<S, E>
where
    S: State,
    E: Event,
    I: IntoIterator<Item = S>,
{
    Transition {
        sources: Sources::Only(sources.into_iter().collect()),
        event,
        target,
        guard: None,
    }
}

/// Create an unconditional transition that fires from any state.
pub fn any_transition<S: State, E: Event>(event: E, target: S) -> Transition<S, E> {
    Transition {
        sources: Sources::Any,
        event,
        target,
        guard: None,
    }
}

/// Create a transition with a guard predicate.
///
/// # Example
///
/// ```
/// use chargestate::builder::guarded_transition;
/// use chargestate::core::MachineHistory;
/// use chargestate::state_enum;
///
/// state_enum! {
///     enum Relay {
///         Open => "open",
///         Closed => "closed",
///     }
///     initial: Open
/// }
///
/// let transition = guarded_transition(
///     vec![Relay::Open],
///     'c',
///     Relay::Closed,
///     |history: &MachineHistory<Relay, char>, _| history.len() > 1,
/// );
/// assert!(!transition.permits(&MachineHistory::new(Relay::Open)));
/// ```
pub fn guarded_transition<S, E, I, F>(sources: I, event: E, target: S, guard: F) -> Transition<S, E>
where
    S: State,
    E: Event,
    I: IntoIterator<Item = S>,
    F: Fn(&MachineHistory<S, E>, &S) -> bool + Send + Sync + 'static,
{
    Transition {
        sources: Sources::Only(sources.into_iter().collect()),
        event,
        target,
        guard: Some(Guard::new(guard)),
    }
}
