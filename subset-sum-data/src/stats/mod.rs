//! Aggregate statistics over stored solve records.
//!
//! Records are grouped by density and algorithm. Within each group the
//! report gives means of set size, target and elapsed time plus the sample
//! variance of elapsed time. Separately, it counts for each density how
//! often each algorithm was the fastest on an instance that every algorithm
//! solved.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use subset_sum_core::{Algorithm, Density};

use crate::store::StoredRecord;

/// Statistics for one algorithm on one density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStats {
    /// Algorithm the group covers.
    pub algorithm: Algorithm,
    /// Density the group covers; `None` for instances without a label.
    pub density: Option<Density>,
    /// Number of records in the group.
    pub instances: usize,
    /// Records with a solution.
    pub solutions_found: usize,
    /// Mean set size.
    pub mean_size: Option<f64>,
    /// Mean target.
    pub mean_target: Option<f64>,
    /// Mean elapsed time, in seconds.
    pub mean_elapsed_secs: Option<f64>,
    /// Sample variance of elapsed seconds.
    pub elapsed_variance: Option<f64>,
    /// Sample standard deviation of elapsed seconds.
    pub elapsed_std_dev: Option<f64>,
}

/// How often one algorithm was the fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastestCount {
    /// The algorithm.
    pub algorithm: Algorithm,
    /// Instances on which it was fastest.
    pub wins: usize,
}

/// Fastest-algorithm tally for one density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityComparison {
    /// Density compared.
    pub density: Option<Density>,
    /// Instances that every algorithm solved.
    pub compared_instances: usize,
    /// One entry per algorithm, in [`Algorithm::ALL`] order.
    pub fastest: Vec<FastestCount>,
}

/// Aggregated view of a set of stored records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    /// Total records aggregated.
    pub records: usize,
    /// Per density and algorithm statistics.
    pub groups: Vec<AlgorithmStats>,
    /// Per density fastest-algorithm counts.
    pub comparisons: Vec<DensityComparison>,
}

impl Report {
    /// Aggregate `records`.
    ///
    /// Every algorithm gets a group for every density present, even when it
    /// has no records there; such groups report `None` for every mean.
    ///
    /// # Examples
    ///
    /// ```
    /// use subset_sum_data::Report;
    ///
    /// let report = Report::from_records(&[]);
    /// assert_eq!(report.records, 0);
    /// assert!(report.groups.is_empty());
    /// ```
    #[must_use]
    pub fn from_records(records: &[StoredRecord]) -> Self {
        let densities: BTreeSet<Option<Density>> =
            records.iter().map(|record| record.density).collect();
        let groups = densities
            .iter()
            .flat_map(|&density| {
                Algorithm::ALL
                    .into_iter()
                    .map(move |algorithm| group_stats(records, algorithm, density))
            })
            .collect();
        let comparisons = densities
            .iter()
            .map(|&density| compare(records, density))
            .collect();
        Self {
            records: records.len(),
            groups,
            comparisons,
        }
    }
}

fn group_stats(
    records: &[StoredRecord],
    algorithm: Algorithm,
    density: Option<Density>,
) -> AlgorithmStats {
    let members: Vec<&StoredRecord> = records
        .iter()
        .filter(|record| record.algorithm == algorithm && record.density == density)
        .collect();
    let sizes: Vec<f64> = members.iter().map(|record| to_f64(record.set.len())).collect();
    let targets: Vec<f64> = members
        .iter()
        .map(|record| u64_to_f64(record.target))
        .collect();
    let elapsed: Vec<f64> = members
        .iter()
        .map(|record| record.elapsed.as_secs_f64())
        .collect();
    let variance = sample_variance(&elapsed);
    AlgorithmStats {
        algorithm,
        density,
        instances: members.len(),
        solutions_found: members.iter().filter(|record| record.found).count(),
        mean_size: mean(&sizes),
        mean_target: mean(&targets),
        mean_elapsed_secs: mean(&elapsed),
        elapsed_variance: variance,
        elapsed_std_dev: variance.map(f64::sqrt),
    }
}

/// Count wins over the instances every algorithm has a record for. Ties go
/// to the algorithm listed first in [`Algorithm::ALL`].
fn compare(records: &[StoredRecord], density: Option<Density>) -> DensityComparison {
    let mut by_instance: BTreeMap<(&[u64], u64), BTreeMap<Algorithm, Duration>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.density == density) {
        by_instance
            .entry((record.set.as_slice(), record.target))
            .or_default()
            .insert(record.algorithm, record.elapsed);
    }

    let mut wins: BTreeMap<Algorithm, usize> = BTreeMap::new();
    let mut compared_instances = 0;
    for timings in by_instance.values() {
        if timings.len() < Algorithm::ALL.len() {
            continue;
        }
        compared_instances += 1;
        // BTreeMap iterates in Algorithm::ALL order, so min_by_key keeps the
        // earliest algorithm on ties.
        if let Some((&fastest, _)) = timings.iter().min_by_key(|&(_, elapsed)| *elapsed) {
            *wins.entry(fastest).or_default() += 1;
        }
    }

    DensityComparison {
        density,
        compared_instances,
        fastest: Algorithm::ALL
            .into_iter()
            .map(|algorithm| FastestCount {
                algorithm,
                wins: wins.get(&algorithm).copied().unwrap_or_default(),
            })
            .collect(),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "set sizes are far below 2^52 and only feed summary statistics"
)]
const fn to_f64(value: usize) -> f64 {
    value as f64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "targets only feed summary statistics; rounding is acceptable"
)]
const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}

#[expect(clippy::float_arithmetic, reason = "statistics are inherently floating point")]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / to_f64(values.len()))
}

/// Sample variance with one degree of freedom removed. A single sample has
/// zero variance; no samples have none.
#[expect(clippy::float_arithmetic, reason = "statistics are inherently floating point")]
fn sample_variance(values: &[f64]) -> Option<f64> {
    let centre = mean(values)?;
    if values.len() == 1 {
        return Some(0.0);
    }
    let squares: f64 = values.iter().map(|value| (value - centre).powi(2)).sum();
    Some(squares / to_f64(values.len() - 1))
}
