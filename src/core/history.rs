//! Machine history tracking.
//!
//! Every machine owns an append-only history. The first entry is created at
//! construction and carries no event and no timestamp; each later entry
//! records the event that produced it, the resulting state and when it
//! happened.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single historical item: the event that was applied and the state it
/// produced.
///
/// # Example
///
/// ```rust
/// use chargestate::core::HistoryEntry;
/// use chargestate::domain::NetworkStatus;
///
/// let entry: HistoryEntry<NetworkStatus, ()> = HistoryEntry::initial(NetworkStatus::Unknown);
/// assert!(entry.event.is_none());
/// assert!(entry.timestamp.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry<S, E> {
    /// The event that produced this entry, `None` for the construction entry
    pub event: Option<E>,
    /// The state the machine was in after the event
    pub state: S,
    /// When the event occurred, `None` for the construction entry
    pub timestamp: Option<DateTime<Utc>>,
}

impl<S, E> HistoryEntry<S, E> {
    /// Entry recorded when a machine is constructed.
    pub fn initial(state: S) -> Self {
        Self {
            event: None,
            state,
            timestamp: None,
        }
    }
}

/// Append-only sequence of history entries.
///
/// Never empty: it always holds at least the construction entry. Only the
/// owning machine can append, and it does so as the last step of a
/// successful dispatch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineHistory<S, E> {
    entries: Vec<HistoryEntry<S, E>>,
}

impl<S: State, E: Copy> MachineHistory<S, E> {
    /// Create a history holding only the construction entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chargestate::core::{MachineHistory, State};
    /// use chargestate::domain::StationStatus;
    ///
    /// let history: MachineHistory<StationStatus, ()> = MachineHistory::new(StationStatus::initial());
    /// assert_eq!(history.len(), 1);
    /// assert_eq!(history.current(), StationStatus::Unknown);
    /// ```
    pub fn new(initial: S) -> Self {
        Self {
            entries: vec![HistoryEntry::initial(initial)],
        }
    }

    pub(crate) fn record(&mut self, event: E, state: S, timestamp: DateTime<Utc>) {
        self.entries.push(HistoryEntry {
            event: Some(event),
            state,
            timestamp: Some(timestamp),
        });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry<S, E>] {
        &self.entries
    }

    /// Number of entries, including the construction entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State recorded by the most recent entry.
    pub fn current(&self) -> S {
        // The construction entry guarantees at least one element.
        self.entries
            .last()
            .map_or_else(S::initial, |entry| entry.state)
    }

    /// The sequence of states traversed, oldest first.
    pub fn path(&self) -> Vec<S> {
        self.entries.iter().map(|entry| entry.state).collect()
    }

    /// Scan from the most recent entry backwards and return the first entry
    /// whose state satisfies `predicate`.
    pub fn last_matching<F>(&self, predicate: F) -> Option<&HistoryEntry<S, E>>
    where
        F: Fn(&S) -> bool,
    {
        self.entries
            .iter()
            .rev()
            .find(|entry| predicate(&entry.state))
    }

    /// Time between the first and last timestamped entries.
    ///
    /// Returns `None` until at least one event has been recorded.
    pub fn span(&self) -> Option<Duration> {
        let mut stamped = self.entries.iter().filter_map(|entry| entry.timestamp);
        let first = stamped.next()?;
        let last = stamped.last().unwrap_or(first);
        last.signed_duration_since(first).to_std().ok()
    }
}
