//! Instance generation, result persistence and benchmark reporting.
//!
//! The solvers never touch randomness or I/O. This crate supplies the
//! collaborators around them:
//!
//! - [`InstanceGenerator`], a seeded [`InstanceSource`](subset_sum_core::InstanceSource)
//!   producing dense or sparse instances;
//! - [`SqliteResultStore`], a [`ResultSink`](subset_sum_core::ResultSink)
//!   backed by SQLite;
//! - [`BenchmarkRunner`], which feeds generated instances to every solver and
//!   records the results;
//! - [`Report`], statistics aggregated over stored records.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod fs;
mod generator;
mod runner;
mod stats;
mod store;

pub use generator::{GeneratorConfig, GeneratorConfigError, InstanceGenerator, TargetStyle};
pub use runner::{BenchmarkRunner, RunError, RunSummary};
pub use stats::{AlgorithmStats, DensityComparison, FastestCount, Report};
pub use store::{SqliteResultStore, StoreError, StoredRecord};
