//! End-to-end tests over a small multi-charger fleet.

use chargestate::classify::{unique_chargers, AlarmRecord, Classifier, ClassifyError};
use chargestate::config::ClassifierConfig;
use chargestate::domain::{CircuitSharingStatus, NetworkStatus, StationStatus};
use chargestate::report::analyze;
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

const NORTH: &str = "00:1A:2B:3C:4D:01";
const SOUTH: &str = "00:1A:2B:3C:4D:02";
const IDLE: &str = "00:1A:2B:3C:4D:03";

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap()
}

fn hours(n: u64) -> Duration {
    Duration::from_secs(n * 3600)
}

fn fleet_alarms() -> Vec<AlarmRecord> {
    vec![
        AlarmRecord::new(NORTH, "Boot up", at(0)),
        AlarmRecord::new(SOUTH, "Boot up", at(0)),
        AlarmRecord::new(SOUTH, "Circuit Sharing Current Reduced", at(1)),
        AlarmRecord::new(NORTH, "Hardware Fault", at(4)),
        AlarmRecord::new(SOUTH, "Powered Off", at(5)),
        AlarmRecord::new(NORTH, "EVSE Unreachable", at(6)),
        AlarmRecord::new(NORTH, "Reachable", at(7)),
        AlarmRecord::new(SOUTH, "Boot up", at(8)),
        AlarmRecord::new(NORTH, "Fault Cleared", at(10)),
        AlarmRecord::new(SOUTH, "Hardware Fault", at(11)),
        AlarmRecord::new(NORTH, "Boot up", at(12)),
        AlarmRecord::new(SOUTH, "Fault Cleared", at(12)),
    ]
}

#[test]
fn fleet_report_with_last_known_state() {
    let config = ClassifierConfig::default().with_return_to_last_known_state(true);
    let chargers = vec![NORTH.to_string(), SOUTH.to_string(), IDLE.to_string()];

    let report = analyze(&config, &chargers, &fleet_alarms()).unwrap();

    let north: Vec<_> = report
        .intervals
        .iter()
        .filter(|i| i.charger_id == NORTH)
        .map(|i| (i.state.as_str(), i.duration))
        .collect();
    assert_eq!(
        north,
        vec![
            ("available", hours(4)),
            ("faulted", hours(2)),
            ("unreachable", hours(1)),
            ("faulted", hours(3)),
        ]
    );

    let stats = &report.statistics;
    assert_eq!(stats.chargers().collect::<Vec<_>>(), vec![NORTH, SOUTH]);
    assert_eq!(stats.duration(NORTH, "faulted"), Some(hours(5)));
    assert_eq!(stats.duration(SOUTH, "faulted"), Some(hours(1)));
    assert_eq!(stats.duration(SOUTH, "unreachable"), Some(Duration::ZERO));
    assert_eq!(stats.total[SOUTH], hours(12));
    assert_eq!(
        stats.states,
        vec!["available", "faulted", "unavailable", "unreachable"]
    );
    assert_eq!(stats.fraction(SOUTH, "unavailable"), Some(0.25));
}

#[test]
fn fallback_to_available_without_last_known_state() {
    let chargers = unique_chargers(&fleet_alarms());
    let report = analyze(&ClassifierConfig::default(), &chargers, &fleet_alarms()).unwrap();

    let north: Vec<_> = report
        .timeline
        .iter()
        .filter(|s| s.charger_id == NORTH)
        .map(|s| s.state.as_str())
        .collect();
    assert_eq!(
        north,
        vec!["available", "faulted", "unreachable", "available", "available", "available"]
    );
}

#[test]
fn classifier_keeps_state_across_batches() {
    let alarms = fleet_alarms();
    let (first, second) = alarms.split_at(6);
    let mut classifier =
        Classifier::new(&ClassifierConfig::default().with_return_to_last_known_state(true)).unwrap();
    classifier.register_chargers([IDLE]);

    classifier.replay(first).unwrap();
    classifier.replay(second).unwrap();

    let snapshot = classifier.fleet_snapshot();
    assert_eq!(snapshot[NORTH].network_status, NetworkStatus::Reachable);
    assert_eq!(snapshot[NORTH].station_status, StationStatus::Available);
    assert_eq!(snapshot[SOUTH].station_status, StationStatus::Available);
    assert_eq!(
        snapshot[SOUTH].circuit_sharing_status,
        CircuitSharingStatus::Unknown
    );
    assert_eq!(snapshot[IDLE].station_status, StationStatus::Unknown);

    let north = classifier.model(NORTH).unwrap();
    assert_eq!(
        north.station().history().path(),
        vec![
            StationStatus::Unknown,
            StationStatus::Available,
            StationStatus::Faulted,
            StationStatus::Unreachable,
            StationStatus::Faulted,
            StationStatus::Available,
            StationStatus::Available,
        ]
    );
}

#[test]
fn bad_batch_reports_every_issue_and_changes_nothing() {
    let mut classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
    let records = vec![
        AlarmRecord::new(NORTH, "Boot up", at(3)),
        AlarmRecord::new(NORTH, "Coffee spill", at(4)),
        AlarmRecord::new(NORTH, "Powered Off", at(2)),
    ];

    let err = classifier.replay(&records).unwrap_err();

    assert!(matches!(&err, ClassifyError::InvalidRecords(issues) if issues.len() == 2));
    assert_eq!(err.to_string(), "2 invalid alarm record(s) in batch");
    assert!(classifier.model(NORTH).is_none());
}
