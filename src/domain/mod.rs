//! Domain state machines for charger health.
//!
//! Three orthogonal views of one charger, each a transition table over
//! [`AlarmKind`] events:
//! - `NetworkStatus`: is the charger talking to the backend
//! - `StationStatus`: can the charger serve a vehicle
//! - `CircuitSharingStatus`: is its supply current reduced by load sharing
//!
//! Tables are built once per configuration by explicit constructor
//! functions and shared by every charger.

mod circuit_sharing;
mod network;
mod station;

pub use circuit_sharing::{circuit_sharing_table, CircuitSharingStatus};
pub use network::{network_table, NetworkStatus};
pub use station::{station_table, StationStatus};

use crate::alarm::AlarmKind;
use crate::core::{Guard, MachineHistory, State};

/// Guard used by REACHABLE transitions: the candidate wins only when it is
/// the last state the machine held outside of `transient`.
///
/// Always fails when `enabled` is false, so the unconditional fallback
/// declared after the guarded candidates applies.
pub fn last_known_state_guard<S: State>(
    enabled: bool,
    transient: &'static [S],
) -> Guard<S, AlarmKind> {
    Guard::new(move |history: &MachineHistory<S, AlarmKind>, target: &S| {
        enabled
            && history
                .last_matching(|state| !transient.contains(state))
                .is_some_and(|entry| entry.state == *target)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const TRANSIENT: &[StationStatus] = &[StationStatus::Unknown, StationStatus::Unreachable];

    fn history(states: &[StationStatus]) -> MachineHistory<StationStatus, AlarmKind> {
        let mut history = MachineHistory::new(StationStatus::initial());
        for state in states {
            history.record(AlarmKind::BootUp, *state, Utc::now());
        }
        history
    }

    #[test]
    fn disabled_guard_always_fails() {
        let guard = last_known_state_guard(false, TRANSIENT);
        let history = history(&[StationStatus::Available, StationStatus::Unreachable]);

        for target in StationStatus::all() {
            assert!(!guard.check(&history, target));
        }
    }

    #[test]
    fn enabled_guard_matches_last_known_state_only() {
        let guard = last_known_state_guard(true, TRANSIENT);
        let history = history(&[
            StationStatus::Faulted,
            StationStatus::Available,
            StationStatus::Unreachable,
        ]);

        assert!(guard.check(&history, &StationStatus::Available));
        assert!(!guard.check(&history, &StationStatus::Faulted));
        assert!(!guard.check(&history, &StationStatus::Unavailable));
    }

    #[test]
    fn enabled_guard_fails_without_known_state() {
        let guard = last_known_state_guard(true, TRANSIENT);
        let history = history(&[StationStatus::Unreachable]);

        for target in StationStatus::all() {
            assert!(!guard.check(&history, target));
        }
    }
}
