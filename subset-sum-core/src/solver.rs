use std::time::Duration;

use thiserror::Error;

use crate::{Algorithm, Instance, InstanceError, SolverResult};

/// Capacity errors detected before a solver allocates its working state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExhausted {
    /// The full dynamic programming table would exceed the cell ceiling.
    #[error("dynamic programming table needs {cells} cells but the ceiling is {limit}")]
    TableTooLarge {
        /// Cells required, `(n + 1) * (T + 1)`.
        cells: u128,
        /// Configured ceiling.
        limit: u64,
    },
    /// The target exceeds the reachable-sum ceiling.
    #[error("target {target} exceeds the configured ceiling of {limit}")]
    TargetTooLarge {
        /// Requested target.
        target: u64,
        /// Configured ceiling.
        limit: u64,
    },
    /// One half of the set is too long to enumerate every sub-collection.
    #[error("half of {len} elements exceeds the enumerable limit of {limit}")]
    HalfTooLarge {
        /// Length of the larger half.
        len: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

/// Errors returned by [`Solver::solve`].
///
/// "No solution" is not an error; see [`SolverResult::found`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Raw input did not describe a valid instance.
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InstanceError),
    /// The instance is too large for the chosen algorithm.
    #[error("resource limit exceeded: {0}")]
    ResourceExhausted(#[from] ResourceExhausted),
    /// A caller-imposed deadline expired mid-search.
    #[error("search exceeded its time limit of {limit:?} after {operations} operations")]
    TimeLimitExceeded {
        /// The configured limit.
        limit: Duration,
        /// Work performed before giving up.
        operations: u64,
    },
}

/// Decide a subset-sum instance and construct a witness.
///
/// Implementations must be side-effect free apart from building the returned
/// [`SolverResult`]: no state is shared between calls, so one solver may be
/// used from several threads at once.
pub trait Solver: Send + Sync {
    /// The strategy implemented by this solver.
    fn algorithm(&self) -> Algorithm;

    /// Solve a validated instance.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::ResourceExhausted`] when the instance exceeds a
    /// configured ceiling; the check happens before any search work.
    fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError>;

    /// Validate raw signed input, then solve it.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidInstance`] without running the search
    /// when the input is invalid, otherwise whatever [`Solver::solve`]
    /// returns.
    fn solve_values(&self, set: &[i64], target: i64) -> Result<SolverResult, SolveError> {
        let instance = Instance::from_signed(set, target)?;
        self.solve(&instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct EmptyOnlySolver;

    impl Solver for EmptyOnlySolver {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Backtracking
        }

        fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError> {
            if instance.target() == 0 {
                Ok(SolverResult::solved(
                    self.algorithm(),
                    Vec::new(),
                    0,
                    Duration::ZERO,
                ))
            } else {
                Ok(SolverResult::unsolved(self.algorithm(), 0, Duration::ZERO))
            }
        }
    }

    #[rstest]
    #[case(0, true)]
    #[case(4, false)]
    fn solve_values_delegates_valid_input(#[case] target: i64, #[case] found: bool) {
        let result = EmptyOnlySolver
            .solve_values(&[1, 2], target)
            .expect("valid input");
        assert_eq!(result.found, found);
    }

    #[rstest]
    fn solve_values_rejects_invalid_input_before_solving() {
        let err = EmptyOnlySolver
            .solve_values(&[1, 0], 1)
            .expect_err("zero element");
        assert_eq!(
            err,
            SolveError::InvalidInstance(InstanceError::NonPositiveElement { index: 1, value: 0 })
        );
    }
}
