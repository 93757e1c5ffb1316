//! Per-charger composition of the three domain machines.

use crate::alarm::AlarmKind;
use crate::builder::BuildError;
use crate::config::ClassifierConfig;
use crate::domain::{
    circuit_sharing_table, network_table, station_table, CircuitSharingStatus, NetworkStatus,
    StationStatus,
};
use crate::engine::{DispatchResult, StateMachine, TransitionTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The three domain tables for one configuration, shared by every charger
/// model of a run.
#[derive(Clone, Debug)]
pub struct MachineTables {
    network: Arc<TransitionTable<NetworkStatus, AlarmKind>>,
    station: Arc<TransitionTable<StationStatus, AlarmKind>>,
    circuit_sharing: Arc<TransitionTable<CircuitSharingStatus, AlarmKind>>,
}

impl MachineTables {
    pub fn new(config: &ClassifierConfig) -> Result<Self, BuildError> {
        Ok(Self {
            network: Arc::new(network_table()?),
            station: Arc::new(station_table(config.return_to_last_known_state)?),
            circuit_sharing: Arc::new(circuit_sharing_table(config.return_to_last_known_state)?),
        })
    }
}

/// Current state of each machine, by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargerSnapshot {
    pub network_status: NetworkStatus,
    pub station_status: StationStatus,
    pub circuit_sharing_status: CircuitSharingStatus,
}

/// What each machine did with one alarm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargerDispatch {
    pub network: DispatchResult<NetworkStatus>,
    pub station: DispatchResult<StationStatus>,
    pub circuit_sharing: DispatchResult<CircuitSharingStatus>,
}

/// Model of one physical charger.
///
/// Machines never read each other's state; `send` still fans out in a fixed
/// order (network, station, circuit sharing) so runs are reproducible.
///
/// # Example
///
/// ```rust
/// use chargestate::alarm::AlarmKind;
/// use chargestate::charger::{ChargerModel, MachineTables};
/// use chargestate::config::ClassifierConfig;
/// use chargestate::domain::StationStatus;
/// use chrono::Utc;
///
/// let tables = MachineTables::new(&ClassifierConfig::default()).unwrap();
/// let mut model = ChargerModel::new("00:1A:2B:3C:4D:5E", &tables);
///
/// model.send(AlarmKind::BootUp, Utc::now());
/// assert_eq!(model.snapshot().station_status, StationStatus::Available);
/// ```
#[derive(Clone, Debug)]
pub struct ChargerModel {
    id: String,
    network: StateMachine<NetworkStatus, AlarmKind>,
    station: StateMachine<StationStatus, AlarmKind>,
    circuit_sharing: StateMachine<CircuitSharingStatus, AlarmKind>,
}

impl ChargerModel {
    pub fn new(id: impl Into<String>, tables: &MachineTables) -> Self {
        Self {
            id: id.into(),
            network: StateMachine::new(Arc::clone(&tables.network)),
            station: StateMachine::new(Arc::clone(&tables.station)),
            circuit_sharing: StateMachine::new(Arc::clone(&tables.circuit_sharing)),
        }
    }

    /// Dispatch one alarm to every machine.
    pub fn send(&mut self, kind: AlarmKind, timestamp: DateTime<Utc>) -> ChargerDispatch {
        let network = self.network.dispatch(kind, timestamp);
        let station = self.station.dispatch(kind, timestamp);
        let circuit_sharing = self.circuit_sharing.dispatch(kind, timestamp);
        ChargerDispatch {
            network,
            station,
            circuit_sharing,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snapshot(&self) -> ChargerSnapshot {
        ChargerSnapshot {
            network_status: self.network.current_state(),
            station_status: self.station.current_state(),
            circuit_sharing_status: self.circuit_sharing.current_state(),
        }
    }

    pub fn network(&self) -> &StateMachine<NetworkStatus, AlarmKind> {
        &self.network
    }

    pub fn station(&self) -> &StateMachine<StationStatus, AlarmKind> {
        &self.station
    }

    pub fn circuit_sharing(&self) -> &StateMachine<CircuitSharingStatus, AlarmKind> {
        &self.circuit_sharing
    }
}

impl fmt::Display for ChargerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        write!(
            f,
            "ChargerModel(network_status={}, station_status={}, circuit_sharing_status={})",
            snapshot.network_status, snapshot.station_status, snapshot.circuit_sharing_status
        )
    }
}
