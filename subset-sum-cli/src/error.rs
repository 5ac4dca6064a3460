//! Error types emitted by the subset-sum CLI.
//!
//! Many helpers return `Result<_, CliError>` and the workspace denies
//! `clippy::result_large_err`, so bulky sources are boxed.

use std::sync::Arc;

use camino::Utf8PathBuf;
use subset_sum_core::{Algorithm, InstanceError, SolveError};
use subset_sum_data::{GeneratorConfigError, RunError, StoreError};
use thiserror::Error;

/// Errors emitted by the subset-sum CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag that was not supplied.
        field: &'static str,
        /// Environment variable that could supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the instance file failed.
    #[error("failed to open instance at {path:?}: {source}")]
    OpenInstance {
        /// Instance file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Instance JSON could not be decoded or failed validation.
    #[error("failed to parse instance JSON at {path:?}: {source}")]
    ParseInstance {
        /// Instance file path.
        path: Utf8PathBuf,
        /// Decoding error; validation failures surface as custom errors.
        #[source]
        source: serde_json::Error,
    },
    /// The solver rejected the instance.
    #[error("{algorithm} failed: {source}")]
    Solve {
        /// Algorithm that was run.
        algorithm: Algorithm,
        /// Solver error.
        #[source]
        source: SolveError,
    },
    /// The benchmark settings do not describe a valid generator.
    #[error("invalid benchmark settings: {0}")]
    Generator(#[from] GeneratorConfigError),
    /// Opening or reading the results database failed.
    #[error("results database {path:?}: {source}")]
    Store {
        /// Database path.
        path: Utf8PathBuf,
        /// Store error.
        #[source]
        source: Box<StoreError>,
    },
    /// A benchmark run aborted.
    #[error("benchmark run into {path:?} aborted: {source}")]
    Run {
        /// Database path.
        path: Utf8PathBuf,
        /// Runner error.
        #[source]
        source: Box<RunError<InstanceError, StoreError>>,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
