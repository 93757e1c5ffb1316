//! Classification driver: replays a sorted alarm stream through per-charger
//! models and samples the station status after every alarm.
//!
//! A batch is validated as a whole before anything is dispatched. Every
//! unmapped alarm text and every out-of-order record is collected with
//! Stillwater's `Validation`, so one failed run reports all of them and no
//! model is left half-updated.

pub mod error;

pub use error::{ClassifyError, RecordIssue};

use crate::alarm::AlarmKind;
use crate::charger::{ChargerModel, ChargerSnapshot, MachineTables};
use crate::config::ClassifierConfig;
use crate::core::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, info};

/// One upstream alarm row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRecord {
    /// Charger MAC address
    pub charger_id: String,
    /// Raw alarm display string
    pub alarm_name: String,
    pub time: DateTime<Utc>,
}

impl AlarmRecord {
    pub fn new(
        charger_id: impl Into<String>,
        alarm_name: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            charger_id: charger_id.into(),
            alarm_name: alarm_name.into(),
            time,
        }
    }
}

/// Station status of one charger right after one alarm was dispatched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTimelineSample {
    pub charger_id: String,
    pub time: DateTime<Utc>,
    pub state: String,
}

type Checked<T> = Validation<T, NonEmptyVec<RecordIssue>>;

/// Replays alarm batches through one model per charger.
pub struct Classifier {
    tables: MachineTables,
    models: BTreeMap<String, ChargerModel>,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        Ok(Self {
            tables: MachineTables::new(config)?,
            models: BTreeMap::new(),
        })
    }

    /// Create models for known chargers up front, so chargers that never
    /// raise an alarm still show up in snapshots.
    pub fn register_chargers<I, T>(&mut self, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if !self.models.contains_key(&id) {
                let model = ChargerModel::new(id.clone(), &self.tables);
                self.models.insert(id, model);
            }
        }
    }

    /// Replay a batch sorted ascending by time within each charger.
    ///
    /// Fails without touching any model if a record's alarm text is unknown
    /// or a record is earlier than its charger's previous alarm (including
    /// alarms from earlier batches). Equal timestamps are allowed.
    pub fn replay(
        &mut self,
        records: &[AlarmRecord],
    ) -> Result<Vec<StateTimelineSample>, ClassifyError> {
        let kinds = self.validate(records)?;

        let mut timeline = Vec::with_capacity(records.len());
        for (record, kind) in records.iter().zip(kinds) {
            let tables = &self.tables;
            let model = self
                .models
                .entry(record.charger_id.clone())
                .or_insert_with(|| {
                    debug!(charger_id = %record.charger_id, "first alarm for unregistered charger");
                    ChargerModel::new(record.charger_id.clone(), tables)
                });
            model.send(kind, record.time);
            timeline.push(StateTimelineSample {
                charger_id: record.charger_id.clone(),
                time: record.time,
                state: model.station().current_state().name().to_string(),
            });
        }

        info!(
            records = records.len(),
            chargers = self.models.len(),
            "alarm batch replayed"
        );
        Ok(timeline)
    }

    fn validate(&self, records: &[AlarmRecord]) -> Result<Vec<AlarmKind>, ClassifyError> {
        let mut last_seen: HashMap<&str, DateTime<Utc>> = HashMap::new();
        let mut kind_checks: Vec<Checked<AlarmKind>> = Vec::with_capacity(records.len());
        let mut order_checks: Vec<Checked<()>> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            kind_checks.push(match AlarmKind::classify(&record.alarm_name) {
                Ok(kind) => Validation::success(kind),
                Err(error) => Validation::fail(RecordIssue::UnknownAlarm { index, error }),
            });

            let previous = last_seen
                .get(record.charger_id.as_str())
                .copied()
                .or_else(|| self.last_alarm_time(&record.charger_id));
            order_checks.push(match previous {
                Some(previous) if record.time < previous => {
                    Validation::fail(RecordIssue::OutOfOrder {
                        index,
                        charger_id: record.charger_id.clone(),
                        previous,
                        current: record.time,
                    })
                }
                _ => Validation::success(()),
            });
            last_seen.insert(record.charger_id.as_str(), record.time);
        }

        match (Validation::all_vec(kind_checks), Validation::all_vec(order_checks)) {
            (Validation::Success(kinds), Validation::Success(_)) => Ok(kinds),
            (kinds, order) => {
                let mut issues: Vec<RecordIssue> = Vec::new();
                if let Validation::Failure(errors) = kinds {
                    issues.extend(errors.iter().cloned());
                }
                if let Validation::Failure(errors) = order {
                    issues.extend(errors.iter().cloned());
                }
                issues.sort_by_key(RecordIssue::index);
                Err(ClassifyError::InvalidRecords(issues))
            }
        }
    }

    // The network table covers every (state, kind) pair, so its history has
    // one entry per alarm ever sent to the model.
    fn last_alarm_time(&self, charger_id: &str) -> Option<DateTime<Utc>> {
        self.models
            .get(charger_id)
            .and_then(|model| model.network().history().entries().last())
            .and_then(|entry| entry.timestamp)
    }

    pub fn model(&self, charger_id: &str) -> Option<&ChargerModel> {
        self.models.get(charger_id)
    }

    /// Models ordered by charger id.
    pub fn models(&self) -> impl Iterator<Item = &ChargerModel> {
        self.models.values()
    }

    pub fn fleet_snapshot(&self) -> BTreeMap<String, ChargerSnapshot> {
        self.models
            .iter()
            .map(|(id, model)| (id.clone(), model.snapshot()))
            .collect()
    }
}

/// Replay one batch through a fresh classifier seeded with `chargers`.
pub fn predict_charger_states(
    config: &ClassifierConfig,
    chargers: &[String],
    records: &[AlarmRecord],
) -> Result<Vec<StateTimelineSample>, ClassifyError> {
    let mut classifier = Classifier::new(config)?;
    classifier.register_chargers(chargers.iter().cloned());
    classifier.replay(records)
}

/// Sorted, deduplicated charger ids appearing in `records`.
pub fn unique_chargers(records: &[AlarmRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.charger_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Split a stream into per-charger partitions, keeping each partition in
/// input order. Partitions are independent and can be replayed in any order.
pub fn partition_by_charger<T, F>(items: &[T], charger_id: F) -> BTreeMap<&str, Vec<&T>>
where
    F: Fn(&T) -> &str,
{
    let mut partitions: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for item in items {
        partitions.entry(charger_id(item)).or_default().push(item);
    }
    partitions
}
