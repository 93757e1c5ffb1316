//! Alarm taxonomy.
//!
//! Vendor alarm feeds report free-text display strings, sometimes with more
//! than one spelling for the same condition. This module maps every known
//! spelling to a canonical [`AlarmKind`] and groups kinds into the semantic
//! sets the domain machines are written against.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw alarm text that matches no registered alias.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown alarm kind: {raw:?}")]
pub struct UnknownAlarmKind {
    pub raw: String,
}

/// Canonical alarm kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmKind {
    BootUp,
    BootupDueToPowerOn,
    BootupDueToSoftReset,
    BootupDueToSwitch,
    BootupDueToWatchdog,
    ChademoControlLoopDetectedFault,
    ChargerFaultContactTritium,
    CircuitSharingReduced,
    CircuitSharingRestored,
    CommunicationTimeout,
    DataPartitionFull,
    EarthFaultStationInService,
    EarthFaultStationOutOfService,
    FaultCleared,
    FcheckError,
    GfciHardTrip,
    GfciSoftTrip,
    GraceSessionsExceeded,
    HardwareFault,
    HardwareFaultStationOutOfService,
    IpMismatchDetected,
    MaintenanceRequired,
    PilotCurrentLevelExceeded,
    PilotUnreachable,
    PoweredOff,
    Reachable,
    RelayStuckClose,
    RfidUpdateFailed,
    SoftEstop,
    StationNotActivated,
    TamperDetect,
    UnknownRfid,
    Unreachable,
    VehicleFault,
    VentilationFault,
}

impl AlarmKind {
    /// Every kind, in declaration order.
    pub const ALL: [AlarmKind; 35] = [
        Self::BootUp,
        Self::BootupDueToPowerOn,
        Self::BootupDueToSoftReset,
        Self::BootupDueToSwitch,
        Self::BootupDueToWatchdog,
        Self::ChademoControlLoopDetectedFault,
        Self::ChargerFaultContactTritium,
        Self::CircuitSharingReduced,
        Self::CircuitSharingRestored,
        Self::CommunicationTimeout,
        Self::DataPartitionFull,
        Self::EarthFaultStationInService,
        Self::EarthFaultStationOutOfService,
        Self::FaultCleared,
        Self::FcheckError,
        Self::GfciHardTrip,
        Self::GfciSoftTrip,
        Self::GraceSessionsExceeded,
        Self::HardwareFault,
        Self::HardwareFaultStationOutOfService,
        Self::IpMismatchDetected,
        Self::MaintenanceRequired,
        Self::PilotCurrentLevelExceeded,
        Self::PilotUnreachable,
        Self::PoweredOff,
        Self::Reachable,
        Self::RelayStuckClose,
        Self::RfidUpdateFailed,
        Self::SoftEstop,
        Self::StationNotActivated,
        Self::TamperDetect,
        Self::UnknownRfid,
        Self::Unreachable,
        Self::VehicleFault,
        Self::VentilationFault,
    ];

    /// Kinds reporting a station boot.
    pub const BOOT: [AlarmKind; 5] = [
        Self::BootUp,
        Self::BootupDueToPowerOn,
        Self::BootupDueToSoftReset,
        Self::BootupDueToSwitch,
        Self::BootupDueToWatchdog,
    ];

    /// Kinds that put a station out of service.
    pub const FAULT: [AlarmKind; 13] = [
        Self::ChademoControlLoopDetectedFault,
        Self::ChargerFaultContactTritium,
        Self::DataPartitionFull,
        Self::EarthFaultStationInService,
        Self::EarthFaultStationOutOfService,
        Self::HardwareFaultStationOutOfService,
        Self::HardwareFault,
        Self::MaintenanceRequired,
        Self::PilotUnreachable,
        Self::RelayStuckClose,
        Self::TamperDetect,
        Self::VentilationFault,
        Self::SoftEstop,
    ];

    /// Every display string the vendor uses for this kind. The first entry
    /// is the canonical spelling.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::BootUp => &["Boot up"],
            Self::BootupDueToPowerOn => &["Bootup Due to POWER ON"],
            Self::BootupDueToSoftReset => &["Bootup Due to SOFT RESET"],
            Self::BootupDueToSwitch => &["Bootup Due to SWITCH"],
            Self::BootupDueToWatchdog => &["Bootup Due to WATCHDOG"],
            Self::ChademoControlLoopDetectedFault => &["CHAdeMO control loop detected fault (39)"],
            Self::ChargerFaultContactTritium => &["Charger Fault - contact Tritium (28)"],
            Self::CircuitSharingReduced => &["Circuit Sharing Current Reduced"],
            Self::CircuitSharingRestored => &["Circuit Sharing Current Restored"],
            Self::CommunicationTimeout => {
                &["Communication timeout. (62)", "Communication timeout. (63)"]
            }
            Self::DataPartitionFull => &["Data Partition Full"],
            Self::EarthFaultStationInService => &["Earth Fault Station In Service"],
            Self::EarthFaultStationOutOfService => &["Earth Fault Station Out Of Service"],
            Self::FaultCleared => &["Fault Cleared"],
            Self::FcheckError => &["FCheck Error"],
            Self::GfciHardTrip => &["GFCI Hard Trip"],
            Self::GfciSoftTrip => &["GFCI Soft Trip"],
            Self::GraceSessionsExceeded => &["Grace Sessions Exceeded"],
            Self::HardwareFault => &["Hardware Fault"],
            Self::HardwareFaultStationOutOfService => &["Hardware Fault Station Out Of Service"],
            Self::IpMismatchDetected => &["IP Mismatch Detected"],
            Self::MaintenanceRequired => &["Maintenance Required"],
            Self::PilotCurrentLevelExceeded => &["Pilot current level exceeded"],
            Self::PilotUnreachable => &["Pilot Unreachable (18)"],
            Self::PoweredOff => &["Powered Off"],
            Self::Reachable => &["Reachable"],
            Self::RelayStuckClose => &["Relay Stuck Close"],
            Self::RfidUpdateFailed => &["RFID Update Failed"],
            Self::SoftEstop => &[
                "Emergency Stop button pressed - No circuit breaker Trip fired (Soft E-Stop) (188)",
            ],
            Self::StationNotActivated => &["Station Not Activated"],
            Self::TamperDetect => &["Tamper Detect"],
            Self::UnknownRfid => &["Unknown RFID"],
            Self::Unreachable => &["Unreachable", "EVSE Unreachable"],
            Self::VehicleFault => &["Vehicle fault (50)"],
            Self::VentilationFault => &["Ventilation Fault"],
        }
    }

    /// Canonical display string.
    pub fn canonical(self) -> &'static str {
        self.aliases()[0]
    }

    /// Resolve raw alarm text to its kind by exact match on any alias.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chargestate::alarm::AlarmKind;
    ///
    /// assert_eq!(AlarmKind::classify("EVSE Unreachable"), Ok(AlarmKind::Unreachable));
    /// assert!(AlarmKind::classify("Coffee machine empty").is_err());
    /// ```
    pub fn classify(raw: &str) -> Result<AlarmKind, UnknownAlarmKind> {
        ALIAS_TABLE
            .get(raw)
            .copied()
            .ok_or_else(|| UnknownAlarmKind {
                raw: raw.to_string(),
            })
    }

    pub fn is_boot(self) -> bool {
        Self::BOOT.contains(&self)
    }

    pub fn is_fault(self) -> bool {
        Self::FAULT.contains(&self)
    }
}

static ALIAS_TABLE: Lazy<HashMap<&'static str, AlarmKind>> = Lazy::new(|| {
    AlarmKind::ALL
        .iter()
        .flat_map(|kind| kind.aliases().iter().map(move |alias| (*alias, *kind)))
        .collect()
});

impl FromStr for AlarmKind {
    type Err = UnknownAlarmKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::classify(s)
    }
}

impl fmt::Display for AlarmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}
