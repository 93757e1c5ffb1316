//! Build errors for transition rules and tables.

use thiserror::Error;

/// Errors that can occur when building transitions and tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source states not specified. Call .from(states) or .from_any()")]
    MissingSources,

    #[error("Transition source set is empty")]
    EmptySources,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTarget,
}
