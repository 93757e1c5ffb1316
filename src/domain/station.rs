//! Service status of a charging station.

use super::last_known_state_guard;
use crate::alarm::AlarmKind;
use crate::builder::{any_transition, simple_transition, BuildError, TableBuilder, TransitionBuilder};
use crate::engine::{Transition, TransitionTable};
use crate::state_enum;

state_enum! {
    /// Whether the station can serve a vehicle.
    pub enum StationStatus {
        Unknown => "unknown",
        Available => "available",
        Occupied => "occupied",
        Unavailable => "unavailable",
        Unreachable => "unreachable",
        Faulted => "faulted",
    }
    initial: Unknown
}

/// States that say nothing about service once the station is back online.
const TRANSIENT: &[StationStatus] = &[StationStatus::Unknown, StationStatus::Unreachable];

/// Candidates for the guarded REACHABLE transition, tried in this order.
const RESTORABLE: [StationStatus; 4] = [
    StationStatus::Available,
    StationStatus::Occupied,
    StationStatus::Unavailable,
    StationStatus::Faulted,
];

/// Build the station table.
///
/// | Trigger        | Target        | From                           |
/// |----------------|---------------|--------------------------------|
/// | boot kinds     | available     | any                            |
/// | fault kinds    | faulted       | any                            |
/// | FAULT_CLEARED  | available     | any but occupied               |
/// | UNREACHABLE    | unreachable   | any                            |
/// | POWERED_OFF    | unavailable   | any                            |
/// | REACHABLE      | last known, else available | unreachable       |
/// | anything else  | available     | any                            |
pub fn station_table(
    return_to_last_known_state: bool,
) -> Result<TransitionTable<StationStatus, AlarmKind>, BuildError> {
    let mut rules: Vec<Transition<StationStatus, AlarmKind>> = Vec::new();

    for kind in AlarmKind::ALL {
        if kind.is_boot() {
            rules.push(any_transition(kind, StationStatus::Available));
        } else if kind.is_fault() {
            rules.push(any_transition(kind, StationStatus::Faulted));
        } else {
            match kind {
                AlarmKind::FaultCleared => rules.push(simple_transition(
                    [
                        StationStatus::Unknown,
                        StationStatus::Available,
                        StationStatus::Unavailable,
                        StationStatus::Unreachable,
                        StationStatus::Faulted,
                    ],
                    kind,
                    StationStatus::Available,
                )),
                AlarmKind::Unreachable => {
                    rules.push(any_transition(kind, StationStatus::Unreachable));
                }
                AlarmKind::PoweredOff => {
                    rules.push(any_transition(kind, StationStatus::Unavailable));
                }
                AlarmKind::Reachable => {
                    let guard = last_known_state_guard(return_to_last_known_state, TRANSIENT);
                    for target in RESTORABLE {
                        rules.push(
                            TransitionBuilder::new()
                                .from([StationStatus::Unreachable])
                                .on(kind)
                                .to(target)
                                .guard(guard.clone())
                                .build()?,
                        );
                    }
                    rules.push(simple_transition(
                        [StationStatus::Unreachable],
                        kind,
                        StationStatus::Available,
                    ));
                }
                _ => rules.push(any_transition(kind, StationStatus::Available)),
            }
        }
    }

    TableBuilder::new().transitions(rules).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::engine::StateMachine;
    use chrono::Utc;
    use std::sync::Arc;

    fn machine(return_to_last_known_state: bool) -> StateMachine<StationStatus, AlarmKind> {
        StateMachine::new(Arc::new(station_table(return_to_last_known_state).unwrap()))
    }

    fn send(
        machine: &mut StateMachine<StationStatus, AlarmKind>,
        kind: AlarmKind,
    ) -> Option<StationStatus> {
        machine.dispatch(kind, Utc::now()).applied()
    }

    #[test]
    fn boot_and_fault_groups_apply_from_any_state() {
        let mut machine = machine(false);
        assert_eq!(send(&mut machine, AlarmKind::TamperDetect), Some(StationStatus::Faulted));
        assert_eq!(send(&mut machine, AlarmKind::BootupDueToSwitch), Some(StationStatus::Available));
        assert_eq!(send(&mut machine, AlarmKind::PoweredOff), Some(StationStatus::Unavailable));
        assert_eq!(send(&mut machine, AlarmKind::SoftEstop), Some(StationStatus::Faulted));
    }

    #[test]
    fn fault_cleared_returns_to_available() {
        let mut machine = machine(false);
        send(&mut machine, AlarmKind::HardwareFault);
        assert_eq!(
            send(&mut machine, AlarmKind::FaultCleared),
            Some(StationStatus::Available)
        );
    }

    #[test]
    fn residual_kinds_mean_available() {
        let mut machine = machine(false);
        send(&mut machine, AlarmKind::Unreachable);
        assert_eq!(
            send(&mut machine, AlarmKind::GfciSoftTrip),
            Some(StationStatus::Available)
        );
    }

    #[test]
    fn reachable_is_only_valid_from_unreachable() {
        let mut machine = machine(true);
        assert_eq!(send(&mut machine, AlarmKind::Reachable), None);
        assert_eq!(machine.history().len(), 1);

        send(&mut machine, AlarmKind::BootUp);
        assert_eq!(send(&mut machine, AlarmKind::Reachable), None);
        assert_eq!(machine.current_state(), StationStatus::Available);
    }

    #[test]
    fn reachable_restores_last_known_state_when_enabled() {
        let mut machine = machine(true);
        send(&mut machine, AlarmKind::PoweredOff);
        send(&mut machine, AlarmKind::Unreachable);

        assert_eq!(
            send(&mut machine, AlarmKind::Reachable),
            Some(StationStatus::Unavailable)
        );
    }

    #[test]
    fn reachable_restores_faulted_across_repeated_outages() {
        let mut machine = machine(true);
        send(&mut machine, AlarmKind::RelayStuckClose);
        send(&mut machine, AlarmKind::Unreachable);
        send(&mut machine, AlarmKind::Unreachable);

        assert_eq!(
            send(&mut machine, AlarmKind::Reachable),
            Some(StationStatus::Faulted)
        );
    }

    #[test]
    fn reachable_falls_back_to_available_when_disabled() {
        let mut machine = machine(false);
        send(&mut machine, AlarmKind::PoweredOff);
        send(&mut machine, AlarmKind::Unreachable);

        assert_eq!(
            send(&mut machine, AlarmKind::Reachable),
            Some(StationStatus::Available)
        );
    }

    #[test]
    fn reachable_without_known_state_falls_back_to_available() {
        let mut machine = machine(true);
        send(&mut machine, AlarmKind::Unreachable);

        assert_eq!(
            send(&mut machine, AlarmKind::Reachable),
            Some(StationStatus::Available)
        );
    }

    #[test]
    fn every_state_reacts_to_outages() {
        let table = station_table(false).unwrap();
        for state in StationStatus::all() {
            assert!(table.covers(*state, AlarmKind::Unreachable));
            assert!(table.covers(*state, AlarmKind::PoweredOff));
        }
        assert!(!table.covers(StationStatus::Occupied, AlarmKind::FaultCleared));
    }
}
