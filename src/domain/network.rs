//! Network reachability of a charger.

use crate::alarm::AlarmKind;
use crate::builder::{any_transition, BuildError, TableBuilder};
use crate::engine::TransitionTable;
use crate::state_enum;

state_enum! {
    /// Whether the charger is reachable from the backend.
    pub enum NetworkStatus {
        Unknown => "unknown",
        Reachable => "reachable",
        Unreachable => "unreachable",
    }
    initial: Unknown
}

/// Build the network table.
///
/// UNREACHABLE and POWERED_OFF lead to `unreachable` from any state. Any
/// other alarm proves the charger can talk to the backend, so every other
/// kind leads to `reachable` from any state. There are no guards.
pub fn network_table() -> Result<TransitionTable<NetworkStatus, AlarmKind>, BuildError> {
    let rules = AlarmKind::ALL.into_iter().map(|kind| {
        let target = match kind {
            AlarmKind::Unreachable | AlarmKind::PoweredOff => NetworkStatus::Unreachable,
            _ => NetworkStatus::Reachable,
        };
        any_transition(kind, target)
    });

    TableBuilder::new().transitions(rules).build()
}
