//! Event-driven state machine runtime.
//!
//! A machine type is a `TransitionTable`: an ordered list of guarded
//! candidate transitions indexed by `(state, event)`. Instances share the
//! table through an `Arc` and own their current state and history.
//!
//! # Key Concepts
//!
//! - **Transitions**: source set, triggering event, target, optional guard
//! - **Tables**: built once per machine type, queried per event
//! - **Dispatch**: first passing candidate wins; anything else is `Ignored`

mod machine;
mod table;
mod transition;

pub use machine::StateMachine;
pub use table::TransitionTable;
pub use transition::{DispatchResult, Sources, Transition};
