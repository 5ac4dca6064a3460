//! Solve command: run one algorithm on an instance file.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use subset_sum_core::{Algorithm, Instance, Solver, SolverResult};
use subset_sum_data::fs::open_utf8_file;
use subset_sum_solvers::{DpMode, HalfLookup, SolversConfig, solver_for};

use crate::{
    ARG_SOLVE_ALGORITHM, ARG_SOLVE_DP_MODE, ARG_SOLVE_INSTANCE, ARG_SOLVE_LOOKUP,
    ARG_SOLVE_MAX_HALF_LEN, ARG_SOLVE_MAX_TABLE_CELLS, ARG_SOLVE_MAX_TARGET,
    ARG_SOLVE_TIME_LIMIT_MS, ARG_SOLVE_TRACE, CliError, ENV_SOLVE_ALGORITHM, ENV_SOLVE_INSTANCE,
    require_existing, write_json,
};

/// Dynamic programming mode as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DpModeArg {
    /// Materialise the full table.
    Full,
    /// Track reachable sums only.
    Compact,
}

impl From<DpModeArg> for DpMode {
    fn from(mode: DpModeArg) -> Self {
        match mode {
            DpModeArg::Full => Self::FullTable,
            DpModeArg::Compact => Self::Compact,
        }
    }
}

/// Meet-in-the-middle lookup as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LookupArg {
    /// Hash map keyed by sum.
    Hashed,
    /// Sorted vector with binary search.
    Sorted,
}

impl From<LookupArg> for HalfLookup {
    fn from(lookup: LookupArg) -> Self {
        match lookup {
            LookupArg::Hashed => Self::Hashed,
            LookupArg::Sorted => Self::Sorted,
        }
    }
}

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a subset-sum instance read from a JSON file of the form \
                 {\"set\": [...], \"target\": T} and print the result as JSON. \
                 Options can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Solve one instance with one algorithm"
)]
#[ortho_config(prefix = "SUBSET_SUM")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the instance.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance_path: Option<Utf8PathBuf>,
    /// Algorithm to run: dp, mitm or backtracking.
    #[arg(long = ARG_SOLVE_ALGORITHM, short = 'a', value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<Algorithm>,
    /// Dynamic programming mode.
    #[arg(long = ARG_SOLVE_DP_MODE, value_enum, value_name = "mode")]
    #[serde(default)]
    pub(crate) dp_mode: Option<DpModeArg>,
    /// Meet-in-the-middle second-half lookup.
    #[arg(long = ARG_SOLVE_LOOKUP, value_enum, value_name = "kind")]
    #[serde(default)]
    pub(crate) lookup: Option<LookupArg>,
    /// Abort backtracking after this many milliseconds.
    #[arg(long = ARG_SOLVE_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Record a diagnostic trace in the output.
    #[arg(long = ARG_SOLVE_TRACE)]
    #[serde(default)]
    pub(crate) trace: bool,
    /// Ceiling on full dynamic programming table cells.
    #[arg(long = ARG_SOLVE_MAX_TABLE_CELLS, value_name = "cells")]
    #[serde(default)]
    pub(crate) max_table_cells: Option<u64>,
    /// Ceiling on the target in compact dynamic programming.
    #[arg(long = ARG_SOLVE_MAX_TARGET, value_name = "target")]
    #[serde(default)]
    pub(crate) max_target: Option<u64>,
    /// Ceiling on the elements per meet-in-the-middle half.
    #[arg(long = ARG_SOLVE_MAX_HALF_LEN, value_name = "len")]
    #[serde(default)]
    pub(crate) max_half_len: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON instance file.
    pub(crate) instance_path: Utf8PathBuf,
    /// Algorithm to run.
    pub(crate) algorithm: Algorithm,
    /// Settings for every solver; only `algorithm`'s are used.
    pub(crate) solvers: SolversConfig,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.instance_path, ARG_SOLVE_INSTANCE)
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let instance_path = args.instance_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_INSTANCE,
            env: ENV_SOLVE_INSTANCE,
        })?;
        let algorithm = args.algorithm.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_ALGORITHM,
            env: ENV_SOLVE_ALGORITHM,
        })?;

        let mut solvers = SolversConfig::default().with_trace(args.trace);
        if let Some(mode) = args.dp_mode {
            solvers.dynamic.mode = mode.into();
        }
        if let Some(cells) = args.max_table_cells {
            solvers.dynamic.max_table_cells = cells;
        }
        if let Some(target) = args.max_target {
            solvers.dynamic.max_target = target;
        }
        if let Some(lookup) = args.lookup {
            solvers.meet_in_middle.lookup = lookup.into();
        }
        if let Some(len) = args.max_half_len {
            solvers.meet_in_middle.max_half_len = len;
        }
        solvers.backtracking.time_limit = args.time_limit_ms.map(Duration::from_millis);

        Ok(Self {
            instance_path,
            algorithm,
            solvers,
        })
    }
}

/// Builds a solver for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn Solver>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn Solver> {
        solver_for(config.algorithm, &config.solvers)
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let result = execute_solve(args, builder)?;
    write_json(writer, &result)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolverResult, CliError> {
    let config = resolve_solve_config(args)?;
    let instance = load_instance(&config.instance_path)?;
    let solver = builder.build(&config);
    log::info!(
        "solving {} elements with target {} using {}",
        instance.len(),
        instance.target(),
        config.algorithm
    );
    solver
        .solve(&instance)
        .map_err(|source| CliError::Solve {
            algorithm: config.algorithm,
            source,
        })
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`Instance`] from disk. Decoding validates it.
pub(super) fn load_instance(path: &Utf8Path) -> Result<Instance, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInstance {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInstance {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
