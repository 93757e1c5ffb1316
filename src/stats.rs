//! Fleet reliability statistics derived from state intervals.

use crate::interval::StateInterval;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::{debug, warn};

/// Square matrix of pairwise correlations indexed by state name.
///
/// Entries are `None` where the correlation is undefined (a state whose
/// total duration is the same for every charger). The diagonal is always
/// `Some(1.0)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.labels.iter().position(|label| label == row)?;
        let j = self.labels.iter().position(|label| label == column)?;
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Time-in-state statistics for a fleet.
///
/// Rows are chargers with at least one interval, columns are every state
/// seen in any interval. Missing combinations are zero, not absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateStatistics {
    pub states: Vec<String>,
    /// Total time per charger per state
    pub total_duration: BTreeMap<String, BTreeMap<String, Duration>>,
    /// Sum across states per charger
    pub total: BTreeMap<String, Duration>,
    /// Fraction of observed time per charger per state
    pub normalized: BTreeMap<String, BTreeMap<String, f64>>,
    /// Spearman correlation between states across chargers
    pub correlation: CorrelationMatrix,
}

impl StateStatistics {
    pub fn chargers(&self) -> impl Iterator<Item = &str> {
        self.total_duration.keys().map(String::as_str)
    }

    pub fn duration(&self, charger_id: &str, state: &str) -> Option<Duration> {
        self.total_duration.get(charger_id)?.get(state).copied()
    }

    pub fn fraction(&self, charger_id: &str, state: &str) -> Option<f64> {
        self.normalized.get(charger_id)?.get(state).copied()
    }
}

/// Aggregate intervals into per-charger totals, fractions and a state
/// correlation matrix.
///
/// Each state is treated as a vector of per-charger total durations; the
/// matrix shows which states' prevalence moves together across the fleet.
pub fn charger_stats(intervals: &[StateInterval]) -> StateStatistics {
    let states: Vec<String> = intervals
        .iter()
        .map(|interval| interval.state.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut total_duration: BTreeMap<String, BTreeMap<String, Duration>> = BTreeMap::new();
    for interval in intervals {
        let row = total_duration
            .entry(interval.charger_id.clone())
            .or_insert_with(|| states.iter().map(|s| (s.clone(), Duration::ZERO)).collect());
        if let Some(cell) = row.get_mut(&interval.state) {
            *cell += interval.duration;
        }
    }

    let total: BTreeMap<String, Duration> = total_duration
        .iter()
        .map(|(charger_id, row)| (charger_id.clone(), row.values().sum()))
        .collect();

    let normalized = total_duration
        .iter()
        .map(|(charger_id, row)| {
            let sum = total.get(charger_id).copied().unwrap_or_default().as_secs_f64();
            if sum == 0.0 {
                warn!(charger_id = %charger_id, "charger has no observed time, fractions set to zero");
            }
            let fractions = row
                .iter()
                .map(|(state, duration)| {
                    let fraction = if sum > 0.0 {
                        duration.as_secs_f64() / sum
                    } else {
                        0.0
                    };
                    (state.clone(), fraction)
                })
                .collect();
            (charger_id.clone(), fractions)
        })
        .collect();

    let columns: Vec<Vec<f64>> = states
        .iter()
        .map(|state| {
            total_duration
                .values()
                .map(|row| row.get(state).copied().unwrap_or_default().as_secs_f64())
                .collect()
        })
        .collect();
    let correlation = correlation_matrix(&states, &columns);

    StateStatistics {
        states,
        total_duration,
        total,
        normalized,
        correlation,
    }
}

fn correlation_matrix(labels: &[String], columns: &[Vec<f64>]) -> CorrelationMatrix {
    let n = labels.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let rho = spearman(&columns[i], &columns[j]);
            if rho.is_none() {
                debug!(a = %labels[i], b = %labels[j], "correlation undefined");
            }
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }
    CorrelationMatrix {
        labels: labels.to_vec(),
        values,
    }
}

/// Spearman rank correlation of two equally long samples.
///
/// Ties get the average of the ranks they span. Returns `None` when either
/// sample has no variance or the lengths differ.
///
/// # Example
///
/// ```rust
/// use chargestate::stats::spearman;
///
/// // Monotonic but not linear.
/// let rho = spearman(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 100.0]).unwrap();
/// assert!((rho - 1.0).abs() < 1e-12);
/// assert_eq!(spearman(&[1.0, 1.0], &[2.0, 3.0]), None);
/// ```
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Ranks are 1-based; positions start..end share their mean.
        let rank = (start + end + 1) as f64 / 2.0;
        for &position in &order[start..end] {
            ranks[position] = rank;
        }
        start = end;
    }
    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }
    Some((covariance / (variance_x.sqrt() * variance_y.sqrt())).clamp(-1.0, 1.0))
}
