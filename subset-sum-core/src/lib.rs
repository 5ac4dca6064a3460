//! Core domain types for the subset-sum engine.
//!
//! An [`Instance`] pairs an ordered multiset of positive integers with a
//! target. Every [`Solver`] turns an instance into a [`SolverResult`]: a
//! witness sub-collection (or a definitive "none exists"), an operation
//! count, the elapsed wall time and, for full-table dynamic programming, the
//! reachability table.
//!
//! Constructors return `Result` so invalid input is rejected before any
//! search begins.
//!
//! # Examples
//!
//! ```
//! use std::time::{Duration, Instant};
//! use subset_sum_core::{Algorithm, Instance, SolveError, Solver, SolverResult};
//!
//! /// Accepts only the trivial target.
//! struct ZeroOnly;
//!
//! impl Solver for ZeroOnly {
//!     fn algorithm(&self) -> Algorithm {
//!         Algorithm::Backtracking
//!     }
//!
//!     fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError> {
//!         let started_at = Instant::now();
//!         Ok(if instance.target() == 0 {
//!             SolverResult::solved(self.algorithm(), Vec::new(), 1, started_at.elapsed())
//!         } else {
//!             SolverResult::unsolved(self.algorithm(), 1, started_at.elapsed())
//!         })
//!     }
//! }
//!
//! let result = ZeroOnly.solve_values(&[], 0).unwrap();
//! assert!(result.found);
//! assert!(ZeroOnly.solve_values(&[-1], 0).is_err());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod algorithm;
mod instance;
mod record;
mod result;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use instance::{Instance, InstanceError};
pub use record::{Density, InstanceSource, ParseDensityError, ResultSink, SolveRecord};
pub use result::{DpTable, SolverResult};
pub use solver::{ResourceExhausted, SolveError, Solver};
