//! Facade crate for the subset-sum engine.
//!
//! This crate re-exports the core domain types and exposes the solvers and
//! the SQLite result store behind feature flags.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "solvers")]
//! # {
//! use subset_sum_engine::{Algorithm, Instance, SolversConfig, solver_for};
//!
//! let instance = Instance::new(vec![10, 10, 10], 20).unwrap();
//! let result = solver_for(Algorithm::Backtracking, &SolversConfig::default())
//!     .solve(&instance)
//!     .unwrap();
//! assert_eq!(result.solution, vec![10, 10]);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use subset_sum_core::{
    Algorithm, Density, DpTable, Instance, InstanceError, InstanceSource, ParseAlgorithmError,
    ParseDensityError, ResourceExhausted, ResultSink, SolveError, SolveRecord, Solver,
    SolverResult,
};

#[cfg(feature = "solvers")]
pub use subset_sum_solvers::{
    BacktrackingConfig, BacktrackingSolver, DpMode, DynamicProgrammingConfig,
    DynamicProgrammingSolver, HalfLookup, MeetInMiddleConfig, MeetInMiddleSolver, SolversConfig,
    TRACE_LIMIT, solver_for,
};

#[cfg(feature = "store-sqlite")]
pub use subset_sum_data::{
    BenchmarkRunner, GeneratorConfig, InstanceGenerator, Report, RunSummary, SqliteResultStore,
    StoreError, StoredRecord, TargetStyle,
};
