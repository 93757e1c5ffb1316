//! End-to-end reliability analysis: alarms in, timeline, intervals and
//! statistics out.

use crate::classify::{predict_charger_states, AlarmRecord, ClassifyError, StateTimelineSample};
use crate::config::ClassifierConfig;
use crate::interval::{extract_intervals, StateInterval};
use crate::stats::{charger_stats, StateStatistics};
use serde::{Deserialize, Serialize};

/// Every artifact of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    pub timeline: Vec<StateTimelineSample>,
    pub intervals: Vec<StateInterval>,
    pub statistics: StateStatistics,
}

impl ReliabilityReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Classify `records`, compress the resulting timeline and aggregate it.
///
/// # Example
///
/// ```rust
/// use chargestate::classify::AlarmRecord;
/// use chargestate::config::ClassifierConfig;
/// use chargestate::report::analyze;
/// use chrono::{TimeZone, Utc};
///
/// let at = |hour| Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
/// let records = vec![
///     AlarmRecord::new("A", "Boot up", at(0)),
///     AlarmRecord::new("A", "Hardware Fault", at(2)),
///     AlarmRecord::new("A", "Fault Cleared", at(3)),
/// ];
///
/// let report = analyze(&ClassifierConfig::default(), &[], &records).unwrap();
/// assert_eq!(report.intervals.len(), 2);
/// assert_eq!(report.statistics.fraction("A", "faulted"), Some(1.0 / 3.0));
/// ```
pub fn analyze(
    config: &ClassifierConfig,
    chargers: &[String],
    records: &[AlarmRecord],
) -> Result<ReliabilityReport, ClassifyError> {
    let timeline = predict_charger_states(config, chargers, records)?;
    let intervals = extract_intervals(&timeline);
    let statistics = charger_stats(&intervals);
    Ok(ReliabilityReport {
        timeline,
        intervals,
        statistics,
    })
}
