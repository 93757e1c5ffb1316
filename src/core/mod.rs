//! Core state machine types.
//!
//! This module contains the pure building blocks every machine is made of:
//! - State sets via the `State` trait and event alphabets via `Event`
//! - Guard predicates over a machine's own history
//! - Append-only history tracking
//!
//! Nothing in here dispatches events; see `engine` for that.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{HistoryEntry, MachineHistory};
pub use state::{Event, State};
