//! The common output contract shared by every solver.

use std::collections::HashMap;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Algorithm, Instance};

/// Boolean reachability table produced by full-table dynamic programming.
///
/// Cell `(i, t)` is `true` when some sub-collection of the first `i`
/// elements sums to `t`. The table has `n + 1` rows and `T + 1` columns and
/// is stored row-major.
///
/// # Examples
///
/// ```
/// use subset_sum_core::DpTable;
///
/// let mut table = DpTable::new(2, 3);
/// assert!(table.set(1, 2, true));
/// assert_eq!(table.get(1, 2), Some(true));
/// assert_eq!(table.get(2, 0), None);
/// assert_eq!(table.row(1), Some(&[false, false, true][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DpTable {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl DpTable {
    /// Allocate a table with every cell `false`.
    ///
    /// Callers are expected to bound `rows * columns` before allocating.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows.saturating_mul(columns)],
        }
    }

    /// Number of rows (`n + 1`).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`T + 1`).
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Read a cell, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.offset(row, column)
            .and_then(|offset| self.cells.get(offset))
            .copied()
    }

    /// Write a cell. Returns `false` when the coordinates are out of bounds.
    pub fn set(&mut self, row: usize, column: usize, value: bool) -> bool {
        match self
            .offset(row, column)
            .and_then(|offset| self.cells.get_mut(offset))
        {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Borrow a full row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        let start = row.checked_mul(self.columns)?;
        let end = start.checked_add(self.columns)?;
        self.cells.get(start..end)
    }

    /// Iterate over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.rows).filter_map(move |row| self.row(row))
    }

    fn offset(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        row.checked_mul(self.columns)?.checked_add(column)
    }
}

/// Outcome of a single solve call.
///
/// A missing solution is not an error: `found` is `false` and `solution` is
/// empty. `table` is only populated by full-table dynamic programming.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverResult {
    /// The algorithm that produced this result.
    pub algorithm: Algorithm,
    /// Witness sub-collection (element values, not indices).
    pub solution: Vec<u64>,
    /// Whether a sub-collection summing to the target exists.
    pub found: bool,
    /// Algorithm-specific unit of work performed.
    pub operations: u64,
    /// Wall time spent inside the solve call.
    pub elapsed: Duration,
    /// Optional diagnostic log.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub trace: Vec<String>,
    /// Reachability table for visualisation.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub table: Option<DpTable>,
}

impl SolverResult {
    /// A result carrying a witness.
    pub const fn solved(
        algorithm: Algorithm,
        solution: Vec<u64>,
        operations: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm,
            solution,
            found: true,
            operations,
            elapsed,
            trace: Vec::new(),
            table: None,
        }
    }

    /// A definitive "no sub-collection sums to the target" result.
    pub const fn unsolved(algorithm: Algorithm, operations: u64, elapsed: Duration) -> Self {
        Self {
            algorithm,
            solution: Vec::new(),
            found: false,
            operations,
            elapsed,
            trace: Vec::new(),
            table: None,
        }
    }

    /// Attach a diagnostic trace.
    #[must_use]
    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = trace;
        self
    }

    /// Attach the full dynamic programming table.
    #[must_use]
    pub fn with_table(mut self, table: DpTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Sum of the witness, widened so it cannot overflow.
    pub fn sum(&self) -> u128 {
        self.solution.iter().map(|&value| u128::from(value)).sum()
    }

    /// Check the witness against the instance it claims to solve.
    ///
    /// A found result must sum to the target and use each value no more
    /// often than it occurs in the set. A result without a solution must
    /// carry an empty witness.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use subset_sum_core::{Algorithm, Instance, SolverResult};
    ///
    /// let instance = Instance::new(vec![10, 10, 10], 20).unwrap();
    /// let ok = SolverResult::solved(Algorithm::Backtracking, vec![10, 10], 3, Duration::ZERO);
    /// assert!(ok.is_witness_for(&instance));
    ///
    /// let reused = Instance::new(vec![10, 5], 20).unwrap();
    /// assert!(!ok.is_witness_for(&reused));
    /// ```
    pub fn is_witness_for(&self, instance: &Instance) -> bool {
        if !self.found {
            return self.solution.is_empty();
        }
        self.sum() == u128::from(instance.target()) && is_sub_multiset(&self.solution, instance.set())
    }
}

fn is_sub_multiset(candidate: &[u64], set: &[u64]) -> bool {
    let mut available: HashMap<u64, usize> = HashMap::new();
    for &value in set {
        *available.entry(value).or_default() += 1;
    }
    candidate.iter().all(|value| match available.get_mut(value) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}
