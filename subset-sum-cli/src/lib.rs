//! Command-line interface for the subset-sum engine.
//!
//! `solve` runs one algorithm on an instance file, `benchmark` fills a SQLite
//! database with generated runs and `report` aggregates that database. Every
//! command prints JSON on stdout; logs go to stderr.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use subset_sum_data::fs::file_is_file;

mod benchmark;
mod error;
mod report;
mod solve;

pub use error::CliError;

use benchmark::{BenchmarkArgs, run_benchmark};
use report::{ReportArgs, run_report};
use solve::{SolveArgs, run_solve};

pub(crate) const ARG_SOLVE_INSTANCE: &str = "instance";
pub(crate) const ARG_SOLVE_ALGORITHM: &str = "algorithm";
pub(crate) const ARG_SOLVE_DP_MODE: &str = "dp-mode";
pub(crate) const ARG_SOLVE_LOOKUP: &str = "lookup";
pub(crate) const ARG_SOLVE_TIME_LIMIT_MS: &str = "time-limit-ms";
pub(crate) const ARG_SOLVE_TRACE: &str = "trace";
pub(crate) const ARG_SOLVE_MAX_TABLE_CELLS: &str = "max-table-cells";
pub(crate) const ARG_SOLVE_MAX_TARGET: &str = "max-target";
pub(crate) const ARG_SOLVE_MAX_HALF_LEN: &str = "max-half-len";
pub(crate) const ENV_SOLVE_INSTANCE: &str = "SUBSET_SUM_CMDS_SOLVE_INSTANCE_PATH";
pub(crate) const ENV_SOLVE_ALGORITHM: &str = "SUBSET_SUM_CMDS_SOLVE_ALGORITHM";

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_BENCHMARK_INSTANCES: &str = "instances";
pub(crate) const ARG_BENCHMARK_MIN_SIZE: &str = "min-size";
pub(crate) const ARG_BENCHMARK_MAX_SIZE: &str = "max-size";
pub(crate) const ARG_BENCHMARK_MAX_VALUE: &str = "max-value";
pub(crate) const ARG_BENCHMARK_PARTITION: &str = "partition";
pub(crate) const ARG_BENCHMARK_SEED: &str = "seed";
pub(crate) const ENV_BENCHMARK_DATABASE: &str = "SUBSET_SUM_CMDS_BENCHMARK_DATABASE";
pub(crate) const ENV_REPORT_DATABASE: &str = "SUBSET_SUM_CMDS_REPORT_DATABASE";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when parsing, configuration or the selected command
/// fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Solve(args) => run_solve(args),
        Command::Benchmark(args) => run_benchmark(args),
        Command::Report(args) => run_report(args),
    }
}

/// Install the stderr logger. A second installation is ignored so tests and
/// embedders may set up their own.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .try_init()
        .is_err()
    {
        log::debug!("logger already installed; keeping it");
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Print `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "subset-sum",
    about = "Solve and benchmark subset-sum instances",
    version
)]
struct Cli {
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve one instance with one algorithm.
    Solve(SolveArgs),
    /// Generate instances, solve them with every algorithm and store the results.
    Benchmark(BenchmarkArgs),
    /// Aggregate stored benchmark results.
    Report(ReportArgs),
}

#[cfg(test)]
mod tests;
