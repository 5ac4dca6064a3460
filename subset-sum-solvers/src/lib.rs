//! Native subset-sum solvers.
//!
//! Three strategies implement [`Solver`](subset_sum_core::Solver):
//!
//! - [`DynamicProgrammingSolver`] fills a reachability table, or tracks
//!   reachable sums only in compact mode. Pseudo-polynomial in the target.
//! - [`MeetInMiddleSolver`] enumerates both halves of the set and joins them
//!   through a sum lookup. Exponential in half the set size.
//! - [`BacktrackingSolver`] runs a pruned depth-first search over the set in
//!   descending order and stops at the first witness.
//!
//! Every solver checks its resource ceilings before allocating and reports
//! an operation count whose unit is specific to the algorithm, so counts are
//! only comparable between runs of the same solver.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backtracking;
mod dynamic;
mod meet_in_middle;
mod trace;

use subset_sum_core::{Algorithm, Solver};

pub use backtracking::{BacktrackingConfig, BacktrackingSolver};
pub use dynamic::{DpMode, DynamicProgrammingConfig, DynamicProgrammingSolver};
pub use meet_in_middle::{HalfLookup, MeetInMiddleConfig, MeetInMiddleSolver};
pub use trace::TRACE_LIMIT;

/// Per-algorithm configuration used by [`solver_for`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolversConfig {
    /// Dynamic programming settings.
    pub dynamic: DynamicProgrammingConfig,
    /// Meet-in-the-middle settings.
    pub meet_in_middle: MeetInMiddleConfig,
    /// Backtracking settings.
    pub backtracking: BacktrackingConfig,
}

impl SolversConfig {
    /// Enable or disable tracing on every solver.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.dynamic.trace = trace;
        self.meet_in_middle.trace = trace;
        self.backtracking.trace = trace;
        self
    }
}

/// Build the solver for `algorithm`.
///
/// # Examples
///
/// ```
/// use subset_sum_core::{Algorithm, Instance};
/// use subset_sum_solvers::{SolversConfig, solver_for};
///
/// let instance = Instance::new(vec![3, 34, 4, 12, 5, 2], 9).unwrap();
/// for algorithm in Algorithm::ALL {
///     let solver = solver_for(algorithm, &SolversConfig::default());
///     assert_eq!(solver.algorithm(), algorithm);
///     assert!(solver.solve(&instance).unwrap().found);
/// }
/// ```
#[must_use]
pub fn solver_for(algorithm: Algorithm, config: &SolversConfig) -> Box<dyn Solver> {
    match algorithm {
        Algorithm::DynamicProgramming => Box::new(DynamicProgrammingSolver::with_config(
            config.dynamic.clone(),
        )),
        Algorithm::MeetInTheMiddle => {
            Box::new(MeetInMiddleSolver::with_config(config.meet_in_middle.clone()))
        }
        Algorithm::Backtracking => Box::new(BacktrackingSolver::with_config(
            config.backtracking.clone(),
        )),
    }
}
