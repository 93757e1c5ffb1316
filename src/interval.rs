//! Compression of a state timeline into half-open duration intervals.

use crate::classify::{partition_by_charger, StateTimelineSample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// A maximal run of one state for one charger, covering `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInterval {
    pub charger_id: String,
    pub state: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
}

impl StateInterval {
    /// Check whether `time` falls inside `[start, end)`.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }
}

/// Compress each charger's timeline into state intervals.
///
/// A run of equal consecutive states starts at its first sample and ends
/// at the first sample of the next distinct state. The last run of every
/// charger has no observed end and is dropped. Samples must be in
/// chronological order within a charger; output is ordered by charger id,
/// then time.
///
/// # Example
///
/// ```rust
/// use chargestate::classify::StateTimelineSample;
/// use chargestate::interval::extract_intervals;
/// use chrono::{TimeZone, Utc};
///
/// let sample = |hour, state: &str| StateTimelineSample {
///     charger_id: "A".to_string(),
///     time: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
///     state: state.to_string(),
/// };
/// let timeline = vec![sample(0, "available"), sample(2, "faulted")];
///
/// let intervals = extract_intervals(&timeline);
/// assert_eq!(intervals.len(), 1);
/// assert_eq!(intervals[0].state, "available");
/// assert_eq!(intervals[0].duration.as_secs(), 2 * 3600);
/// ```
pub fn extract_intervals(timeline: &[StateTimelineSample]) -> Vec<StateInterval> {
    let partitions = partition_by_charger(timeline, |sample| sample.charger_id.as_str());

    let mut intervals = Vec::new();
    for (charger_id, samples) in partitions {
        let mut run_start: Option<&StateTimelineSample> = None;
        for sample in samples {
            match run_start {
                Some(start) if start.state == sample.state => {}
                Some(start) => {
                    intervals.push(StateInterval {
                        charger_id: charger_id.to_string(),
                        state: start.state.clone(),
                        start: start.time,
                        end: sample.time,
                        duration: sample
                            .time
                            .signed_duration_since(start.time)
                            .to_std()
                            .unwrap_or_default(),
                    });
                    run_start = Some(sample);
                }
                None => run_start = Some(sample),
            }
        }
    }

    info!(
        samples = timeline.len(),
        intervals = intervals.len(),
        "state intervals extracted"
    );
    intervals
}
