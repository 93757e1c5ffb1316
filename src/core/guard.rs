//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over a machine's own history and the
//! candidate target state. They decide whether a candidate transition
//! applies and never touch the history they read.

use super::history::MachineHistory;
use super::state::State;
use std::fmt;
use std::sync::Arc;

type Predicate<S, E> = dyn Fn(&MachineHistory<S, E>, &S) -> bool + Send + Sync;

/// Pure predicate that determines if a candidate transition applies.
///
/// # Example
///
/// ```rust
/// use chargestate::core::{Guard, MachineHistory, State};
/// use chargestate::domain::StationStatus;
///
/// // Only allow a transition into a state the machine has already visited.
/// let seen_before = Guard::new(|history: &MachineHistory<StationStatus, ()>, target| {
///     history.last_matching(|s| s == target).is_some()
/// });
///
/// let history = MachineHistory::new(StationStatus::initial());
/// assert!(seen_before.check(&history, &StationStatus::Unknown));
/// assert!(!seen_before.check(&history, &StationStatus::Faulted));
/// ```
pub struct Guard<S, E> {
    predicate: Arc<Predicate<S, E>>,
}

impl<S: State, E: Copy> Guard<S, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic, must not panic and must be
    /// thread-safe so tables can be shared between chargers.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&MachineHistory<S, E>, &S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a history and a candidate target.
    pub fn check(&self, history: &MachineHistory<S, E>, target: &S) -> bool {
        (self.predicate)(history, target)
    }
}

impl<S, E> Clone for Guard<S, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, E> fmt::Debug for Guard<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
