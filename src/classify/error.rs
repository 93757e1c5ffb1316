//! Classification error types.

use crate::alarm::UnknownAlarmKind;
use crate::builder::BuildError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A problem with one input record, found while validating a batch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordIssue {
    /// The alarm text has no registered alias
    #[error("record {index}: {error}")]
    UnknownAlarm {
        index: usize,
        error: UnknownAlarmKind,
    },

    /// The alarm is earlier than the previous alarm for the same charger
    #[error("record {index}: alarm for charger '{charger_id}' at {current} precedes {previous}")]
    OutOfOrder {
        index: usize,
        charger_id: String,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

impl RecordIssue {
    pub fn index(&self) -> usize {
        match self {
            Self::UnknownAlarm { index, .. } | Self::OutOfOrder { index, .. } => *index,
        }
    }
}

/// Errors that abort a replay.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The batch failed validation; nothing was dispatched.
    #[error("{} invalid alarm record(s) in batch", .0.len())]
    InvalidRecords(Vec<RecordIssue>),

    #[error("Machine tables could not be built: {0}")]
    Build(#[from] BuildError),
}

impl ClassifyError {
    /// Every distinct unmapped alarm text, in first-seen order.
    pub fn unknown_alarm_texts(&self) -> Vec<&str> {
        let Self::InvalidRecords(issues) = self else {
            return Vec::new();
        };
        let mut texts: Vec<&str> = Vec::new();
        for issue in issues {
            if let RecordIssue::UnknownAlarm { error, .. } = issue {
                if !texts.contains(&error.raw.as_str()) {
                    texts.push(&error.raw);
                }
            }
        }
        texts
    }
}
