//! Depth-first search with pruning, exponential in the worst case.
//!
//! Elements are sorted in descending order so large values are tried first.
//! The search runs on an explicit stack, so deep sets cannot overflow the
//! call stack, and prunes with three rules: a running sum above the target,
//! a running sum that cannot reach the target even with every remaining
//! element, and a `(position, running sum)` state already expanded.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use subset_sum_core::{Algorithm, Instance, SolveError, Solver, SolverResult};

use crate::trace::Trace;

/// Configuration for [`BacktrackingSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktrackingConfig {
    /// Abort with [`SolveError::TimeLimitExceeded`] once this much time has
    /// passed. `None` searches to completion.
    pub time_limit: Option<Duration>,
    /// Expansions between clock reads.
    pub check_interval: u64,
    /// Record expansions and prunes.
    pub trace: bool,
}

impl Default for BacktrackingConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            check_interval: 1024,
            trace: false,
        }
    }
}

/// Exhaustive search that stops at the first witness.
///
/// # Examples
///
/// ```
/// use subset_sum_core::{Instance, Solver};
/// use subset_sum_solvers::BacktrackingSolver;
///
/// let instance = Instance::new(vec![3, 34, 4, 12, 5, 2], 9).unwrap();
/// let result = BacktrackingSolver::new().solve(&instance).unwrap();
/// assert_eq!(result.solution, vec![5, 4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: BacktrackingConfig,
}

impl BacktrackingSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: BacktrackingConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BacktrackingConfig {
        &self.config
    }
}

/// A pending search state.
#[derive(Debug, Clone, Copy)]
struct SearchFrame {
    /// Index of the next element to decide.
    position: usize,
    running_sum: u64,
    /// Latest inclusion on this path, as an index into the choice arena.
    chosen: Option<usize>,
}

/// An included element, linked to the inclusion before it on the same path.
#[derive(Debug, Clone, Copy)]
struct Choice {
    element: u64,
    parent: Option<usize>,
}

/// Reads the clock every `interval` expansions.
struct Deadline {
    limit: Duration,
    at: Instant,
    interval: u64,
    until_check: u64,
}

impl Deadline {
    fn new(started_at: Instant, config: &BacktrackingConfig) -> Option<Self> {
        let limit = config.time_limit?;
        let interval = config.check_interval.max(1);
        Some(Self {
            limit,
            at: started_at.checked_add(limit)?,
            interval,
            until_check: interval,
        })
    }

    fn expired(&mut self) -> bool {
        self.until_check -= 1;
        if self.until_check > 0 {
            return false;
        }
        self.until_check = self.interval;
        Instant::now() >= self.at
    }
}

impl Solver for BacktrackingSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Backtracking
    }

    fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError> {
        let started_at = Instant::now();
        let mut deadline = Deadline::new(started_at, &self.config);
        let target = instance.target();
        let mut sorted = instance.set().to_vec();
        sorted.sort_unstable_by(|left, right| right.cmp(left));
        let remaining = suffix_sums(&sorted);

        let mut trace = Trace::new(self.config.trace);
        let mut operations = 0_u64;
        let mut choices: Vec<Choice> = Vec::new();
        let mut expanded: HashSet<(usize, u64)> = HashSet::new();
        let mut stack = vec![SearchFrame {
            position: 0,
            running_sum: 0,
            chosen: None,
        }];
        let mut witness = None;

        while let Some(frame) = stack.pop() {
            if frame.running_sum == target {
                trace.record(|| format!("reached {target} at position {}", frame.position));
                witness = Some(collect_path(&choices, frame.chosen));
                break;
            }
            let Some(&element) = sorted.get(frame.position) else {
                continue;
            };
            if frame.running_sum > target {
                continue;
            }
            let reachable = frame.running_sum
                + remaining.get(frame.position).copied().unwrap_or_default();
            if reachable < target {
                trace.record(|| {
                    format!(
                        "prune position {}: at most {reachable} of {target} reachable",
                        frame.position
                    )
                });
                continue;
            }
            if !expanded.insert((frame.position, frame.running_sum)) {
                continue;
            }

            operations += 1;
            if let Some(clock) = deadline.as_mut()
                && clock.expired()
            {
                log::debug!("backtracking stopped after {operations} operations");
                return Err(SolveError::TimeLimitExceeded {
                    limit: clock.limit,
                    operations,
                });
            }
            trace.record(|| {
                format!(
                    "expand position {} with sum {}: try {element}",
                    frame.position, frame.running_sum
                )
            });

            let next = frame.position + 1;
            // Exclusion is pushed first so inclusion is explored first.
            stack.push(SearchFrame {
                position: next,
                running_sum: frame.running_sum,
                chosen: frame.chosen,
            });
            choices.push(Choice {
                element,
                parent: frame.chosen,
            });
            stack.push(SearchFrame {
                position: next,
                running_sum: frame.running_sum + element,
                chosen: Some(choices.len() - 1),
            });
        }

        let result = match witness {
            Some(solution) => SolverResult::solved(
                Algorithm::Backtracking,
                solution,
                operations,
                started_at.elapsed(),
            ),
            None => SolverResult::unsolved(Algorithm::Backtracking, operations, started_at.elapsed()),
        };
        log::debug!(
            "backtracking on {} elements, target {}: found={} operations={} elapsed={:?}",
            instance.len(),
            target,
            result.found,
            result.operations,
            result.elapsed,
        );
        Ok(result.with_trace(trace.into_lines()))
    }
}

/// `remaining[i]` is the sum of `sorted[i..]`; the last entry is zero.
fn suffix_sums(sorted: &[u64]) -> Vec<u64> {
    let mut sums = vec![0_u64; sorted.len() + 1];
    let mut acc = 0_u64;
    for (slot, &value) in sums.iter_mut().zip(sorted).rev() {
        acc += value;
        *slot = acc;
    }
    sums
}

/// Elements on the path ending at `chosen`, in inclusion order.
fn collect_path(choices: &[Choice], chosen: Option<usize>) -> Vec<u64> {
    let mut solution = Vec::new();
    let mut cursor = chosen;
    while let Some(choice) = cursor.and_then(|position| choices.get(position)) {
        solution.push(choice.element);
        cursor = choice.parent;
    }
    solution.reverse();
    solution
}

#[cfg(test)]
mod tests;
