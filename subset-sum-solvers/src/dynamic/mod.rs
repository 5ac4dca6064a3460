//! Dynamic programming over reachable sums.
//!
//! Two modes share one solver. [`DpMode::FullTable`] fills the classic
//! `(n + 1) × (T + 1)` boolean table and returns it for visualisation.
//! [`DpMode::Compact`] keeps only the set of reachable sums plus a parent
//! link per sum, which is enough to rebuild a witness without the table.

use std::collections::HashMap;
use std::time::Instant;

use subset_sum_core::{
    Algorithm, DpTable, Instance, ResourceExhausted, SolveError, Solver, SolverResult,
};

use crate::trace::Trace;

/// Storage strategy for [`DynamicProgrammingSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DpMode {
    /// Fill and return the full reachability table.
    #[default]
    FullTable,
    /// Track reachable sums only; no table is returned.
    Compact,
}

/// Configuration for [`DynamicProgrammingSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicProgrammingConfig {
    /// Table or reachable-set storage.
    pub mode: DpMode,
    /// Largest table, in cells, that full-table mode will allocate.
    pub max_table_cells: u64,
    /// Largest target compact mode will accept.
    pub max_target: u64,
    /// Record a per-cell trace.
    pub trace: bool,
}

impl Default for DynamicProgrammingConfig {
    fn default() -> Self {
        Self {
            mode: DpMode::FullTable,
            max_table_cells: 50_000_000,
            max_target: 10_000_000,
            trace: false,
        }
    }
}

/// Pseudo-polynomial solver, `O(n·T)` time.
///
/// # Examples
///
/// ```
/// use subset_sum_core::{Instance, Solver};
/// use subset_sum_solvers::DynamicProgrammingSolver;
///
/// let instance = Instance::new(vec![3, 34, 4, 12, 5, 2], 9).unwrap();
/// let result = DynamicProgrammingSolver::new().solve(&instance).unwrap();
/// assert!(result.found);
/// assert_eq!(result.solution.iter().sum::<u64>(), 9);
/// assert!(result.table.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DynamicProgrammingSolver {
    config: DynamicProgrammingConfig,
}

impl DynamicProgrammingSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: DynamicProgrammingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DynamicProgrammingConfig {
        &self.config
    }

    fn table_shape(&self, instance: &Instance) -> Result<(usize, usize), ResourceExhausted> {
        let row_count = u128::try_from(instance.len())
            .unwrap_or(u128::MAX)
            .saturating_add(1);
        let cells = row_count.saturating_mul(u128::from(instance.target()).saturating_add(1));
        let too_large = ResourceExhausted::TableTooLarge {
            cells,
            limit: self.config.max_table_cells,
        };
        if cells > u128::from(self.config.max_table_cells) {
            return Err(too_large);
        }
        let columns = usize::try_from(instance.target())
            .ok()
            .and_then(|target| target.checked_add(1))
            .ok_or_else(|| too_large.clone())?;
        let rows = instance.len().checked_add(1).ok_or(too_large)?;
        Ok((rows, columns))
    }

    fn solve_full_table(
        &self,
        instance: &Instance,
        started_at: Instant,
    ) -> Result<SolverResult, SolveError> {
        let (rows, columns) = self.table_shape(instance)?;
        let mut table = DpTable::new(rows, columns);
        let mut trace = Trace::new(self.config.trace);
        let mut operations = 0_u64;

        for row in 0..rows {
            table.set(row, 0, true);
            operations += 1;
            trace.record(|| format!("dp[{row}][0] = true (empty sub-collection)"));
        }

        for (index, &element) in instance.set().iter().enumerate() {
            let row = index + 1;
            let step = usize::try_from(element).ok();
            for sum in 1..columns {
                let carried = table.get(index, sum).unwrap_or(false);
                let used = step
                    .and_then(|width| sum.checked_sub(width))
                    .and_then(|rest| table.get(index, rest))
                    .unwrap_or(false);
                let reachable = carried || used;
                table.set(row, sum, reachable);
                operations += 1;
                trace.record(|| {
                    let action = if used { "include" } else { "exclude" };
                    format!("dp[{row}][{sum}] = {reachable} ({action} {element})")
                });
            }
        }

        let target_column = columns - 1;
        let result = match reconstruct_from_table(&table, instance.set(), target_column) {
            Some(solution) => SolverResult::solved(
                Algorithm::DynamicProgramming,
                solution,
                operations,
                started_at.elapsed(),
            ),
            None => SolverResult::unsolved(
                Algorithm::DynamicProgramming,
                operations,
                started_at.elapsed(),
            ),
        };
        Ok(result.with_trace(trace.into_lines()).with_table(table))
    }

    fn solve_compact(
        &self,
        instance: &Instance,
        started_at: Instant,
    ) -> Result<SolverResult, SolveError> {
        let target = instance.target();
        if target > self.config.max_target {
            return Err(ResourceExhausted::TargetTooLarge {
                target,
                limit: self.config.max_target,
            }
            .into());
        }

        let mut trace = Trace::new(self.config.trace);
        let mut operations = 0_u64;
        let mut reachable: Vec<u64> = vec![0];
        // sum -> (previous sum, element that extended it); first writer wins.
        let mut parents: HashMap<u64, (u64, u64)> = HashMap::new();
        let mut found = target == 0;

        for &element in instance.set() {
            if found {
                break;
            }
            // Only sums reachable before this element may be extended by it.
            let frontier = reachable.len();
            for position in 0..frontier {
                let Some(&sum) = reachable.get(position) else {
                    break;
                };
                let Some(next) = sum.checked_add(element).filter(|&next| next <= target) else {
                    continue;
                };
                if parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, (sum, element));
                reachable.push(next);
                operations += 1;
                trace.record(|| format!("reach {next} = {sum} + {element}"));
                if next == target {
                    found = true;
                    break;
                }
            }
        }

        let result = if found {
            SolverResult::solved(
                Algorithm::DynamicProgramming,
                witness_from_parents(&parents, target),
                operations,
                started_at.elapsed(),
            )
        } else {
            SolverResult::unsolved(
                Algorithm::DynamicProgramming,
                operations,
                started_at.elapsed(),
            )
        };
        Ok(result.with_trace(trace.into_lines()))
    }
}

impl Solver for DynamicProgrammingSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DynamicProgramming
    }

    fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError> {
        let started_at = Instant::now();
        let result = match self.config.mode {
            DpMode::FullTable => self.solve_full_table(instance, started_at)?,
            DpMode::Compact => self.solve_compact(instance, started_at)?,
        };
        log::debug!(
            "dynamic programming ({:?}) on {} elements, target {}: found={} operations={} elapsed={:?}",
            self.config.mode,
            instance.len(),
            instance.target(),
            result.found,
            result.operations,
            result.elapsed,
        );
        Ok(result)
    }
}

/// Walk the table backwards from `(n, target)`.
///
/// An element is taken whenever the cell is reachable with it but not
/// without it, so the witness lists elements in reverse index order.
fn reconstruct_from_table(table: &DpTable, set: &[u64], target: usize) -> Option<Vec<u64>> {
    if table.get(set.len(), target) != Some(true) {
        return None;
    }
    let mut remaining = target;
    let mut solution = Vec::new();
    for (index, &element) in set.iter().enumerate().rev() {
        if remaining == 0 {
            break;
        }
        let with = table.get(index + 1, remaining).unwrap_or(false);
        let without = table.get(index, remaining).unwrap_or(false);
        if with && !without {
            let Some(rest) = usize::try_from(element)
                .ok()
                .and_then(|step| remaining.checked_sub(step))
            else {
                log::warn!("inconsistent table at row {index}: {element} exceeds sum {remaining}");
                debug_assert!(false, "reachability table is inconsistent");
                return None;
            };
            solution.push(element);
            remaining = rest;
        }
    }
    Some(solution)
}

/// Follow parent links from `target` back to zero.
fn witness_from_parents(parents: &HashMap<u64, (u64, u64)>, target: u64) -> Vec<u64> {
    let mut solution = Vec::new();
    let mut sum = target;
    while let Some(&(previous, element)) = parents.get(&sum) {
        solution.push(element);
        sum = previous;
    }
    solution.reverse();
    solution
}

#[cfg(test)]
mod tests;
