//! Chargestate: alarm-driven state classification for EV charging stations
//!
//! Chargers report raw alarm strings. Chargestate normalizes them into a
//! closed set of alarm kinds, replays them per charger through three
//! independent table-driven state machines (network reachability, station
//! availability, circuit sharing), and turns the resulting station status
//! timeline into duration intervals and fleet reliability statistics.
//!
//! # Core Concepts
//!
//! - **Tables**: machine types declared as ordered, guarded transitions
//! - **Models**: one set of machine instances per charger, sharing tables
//! - **Timeline**: station status sampled after every alarm
//! - **Statistics**: time in state, normalized fractions, state correlation
//!
//! # Example
//!
//! ```rust
//! use chargestate::{analyze, AlarmRecord, ClassifierConfig};
//! use chrono::{TimeZone, Utc};
//!
//! let at = |hour| Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap();
//! let records = vec![
//!     AlarmRecord::new("00:1A:2B:3C:4D:5E", "Boot up", at(0)),
//!     AlarmRecord::new("00:1A:2B:3C:4D:5E", "EVSE Unreachable", at(6)),
//!     AlarmRecord::new("00:1A:2B:3C:4D:5E", "Reachable", at(8)),
//! ];
//!
//! let config = ClassifierConfig::default().with_return_to_last_known_state(true);
//! let report = analyze(&config, &[], &records).unwrap();
//!
//! assert_eq!(report.timeline[2].state, "available");
//! assert_eq!(report.intervals.len(), 2);
//! assert_eq!(report.statistics.fraction("00:1A:2B:3C:4D:5E", "unreachable"), Some(0.25));
//! ```

pub mod alarm;
pub mod builder;
pub mod charger;
pub mod classify;
pub mod config;
pub mod core;
pub mod domain;
pub mod engine;
pub mod interval;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub use alarm::{AlarmKind, UnknownAlarmKind};
pub use charger::{ChargerModel, ChargerSnapshot, MachineTables};
pub use classify::{
    predict_charger_states, unique_chargers, AlarmRecord, Classifier, ClassifyError,
    StateTimelineSample,
};
pub use config::ClassifierConfig;
pub use core::{Guard, MachineHistory, State};
pub use domain::{CircuitSharingStatus, NetworkStatus, StationStatus};
pub use engine::{DispatchResult, StateMachine, TransitionTable};
pub use interval::{extract_intervals, StateInterval};
pub use report::{analyze, ReliabilityReport};
pub use stats::{charger_stats, CorrelationMatrix, StateStatistics};
