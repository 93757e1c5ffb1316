//! Circuit sharing (load management) status of a charger.

use super::last_known_state_guard;
use crate::alarm::AlarmKind;
use crate::builder::{simple_transition, BuildError, TableBuilder};
use crate::engine::{Sources, Transition, TransitionTable};
use crate::state_enum;

state_enum! {
    /// Whether the charger's supply current is reduced by circuit sharing.
    pub enum CircuitSharingStatus {
        Unknown => "unknown",
        Unreachable => "unreachable",
        Reduced => "reduced",
        Restored => "restored",
    }
    initial: Unknown
}

const TRANSIENT: &[CircuitSharingStatus] = &[
    CircuitSharingStatus::Unknown,
    CircuitSharingStatus::Unreachable,
];

const ONLINE: [CircuitSharingStatus; 3] = [
    CircuitSharingStatus::Unknown,
    CircuitSharingStatus::Reduced,
    CircuitSharingStatus::Restored,
];

/// Build the circuit sharing table.
///
/// Only sharing, outage, REACHABLE and boot alarms are modeled. Every other
/// kind has no rule and is ignored by this machine: a fault says nothing
/// about load sharing. Booting resets the sharing state to `unknown`, except
/// from `unknown` itself where it is ignored.
pub fn circuit_sharing_table(
    return_to_last_known_state: bool,
) -> Result<TransitionTable<CircuitSharingStatus, AlarmKind>, BuildError> {
    let guard = last_known_state_guard(return_to_last_known_state, TRANSIENT);
    let mut rules: Vec<Transition<CircuitSharingStatus, AlarmKind>> = vec![
        simple_transition(ONLINE, AlarmKind::CircuitSharingReduced, CircuitSharingStatus::Reduced),
        simple_transition(ONLINE, AlarmKind::CircuitSharingRestored, CircuitSharingStatus::Restored),
        simple_transition(ONLINE, AlarmKind::Unreachable, CircuitSharingStatus::Unreachable),
        simple_transition(ONLINE, AlarmKind::PoweredOff, CircuitSharingStatus::Unreachable),
    ];

    for target in [CircuitSharingStatus::Reduced, CircuitSharingStatus::Restored] {
        rules.push(Transition {
            sources: Sources::Only(vec![CircuitSharingStatus::Unreachable]),
            event: AlarmKind::Reachable,
            target,
            guard: Some(guard.clone()),
        });
    }
    rules.push(simple_transition(
        [CircuitSharingStatus::Unreachable],
        AlarmKind::Reachable,
        CircuitSharingStatus::Unknown,
    ));

    rules.extend(AlarmKind::BOOT.into_iter().map(|kind| {
        simple_transition(
            [
                CircuitSharingStatus::Unreachable,
                CircuitSharingStatus::Reduced,
                CircuitSharingStatus::Restored,
            ],
            kind,
            CircuitSharingStatus::Unknown,
        )
    }));

    TableBuilder::new().transitions(rules).build()
}
