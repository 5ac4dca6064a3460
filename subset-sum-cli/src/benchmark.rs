//! Benchmark command: generate instances, solve them with every algorithm
//! and store the results.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use subset_sum_core::{Algorithm, Density, Solver};
use subset_sum_data::{
    BenchmarkRunner, GeneratorConfig, InstanceGenerator, RunSummary, SqliteResultStore,
    TargetStyle,
};
use subset_sum_solvers::{SolversConfig, solver_for};

use crate::{
    ARG_BENCHMARK_INSTANCES, ARG_BENCHMARK_MAX_SIZE, ARG_BENCHMARK_MAX_VALUE,
    ARG_BENCHMARK_MIN_SIZE, ARG_BENCHMARK_PARTITION, ARG_BENCHMARK_SEED, ARG_DATABASE, CliError,
    ENV_BENCHMARK_DATABASE, write_json,
};

const DEFAULT_INSTANCES: usize = 10;

/// CLI arguments for the `benchmark` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Generate seeded dense and sparse instances, solve each with \
                 every algorithm and record the results in a SQLite database. \
                 Prints a summary of the run as JSON.",
    about = "Benchmark every algorithm on generated instances"
)]
#[ortho_config(prefix = "SUBSET_SUM")]
pub(crate) struct BenchmarkArgs {
    /// SQLite database receiving the results; created when missing.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Instances to generate per density.
    #[arg(long = ARG_BENCHMARK_INSTANCES, value_name = "count")]
    #[serde(default)]
    pub(crate) instances: Option<usize>,
    /// Smallest generated set size.
    #[arg(long = ARG_BENCHMARK_MIN_SIZE, value_name = "len")]
    #[serde(default)]
    pub(crate) min_size: Option<usize>,
    /// Largest generated set size.
    #[arg(long = ARG_BENCHMARK_MAX_SIZE, value_name = "len")]
    #[serde(default)]
    pub(crate) max_size: Option<usize>,
    /// Largest element value for sparse instances.
    #[arg(long = ARG_BENCHMARK_MAX_VALUE, value_name = "value")]
    #[serde(default)]
    pub(crate) max_value: Option<u64>,
    /// Target half the set total instead of a random fraction.
    #[arg(long = ARG_BENCHMARK_PARTITION)]
    #[serde(default)]
    pub(crate) partition: bool,
    /// Seed for instance generation.
    #[arg(long = ARG_BENCHMARK_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl BenchmarkArgs {
    pub(crate) fn into_config(self) -> Result<BenchmarkConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BenchmarkConfig::try_from(merged)
    }
}

/// Resolved `benchmark` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BenchmarkConfig {
    /// Results database.
    pub(crate) database: Utf8PathBuf,
    /// Instances per density.
    pub(crate) instances: usize,
    /// Generator settings; the density is replaced for each pass.
    pub(crate) generator: GeneratorConfig,
}

impl BenchmarkConfig {
    /// Generator settings for one density pass.
    fn generator_for(&self, density: Density) -> GeneratorConfig {
        GeneratorConfig {
            density,
            ..self.generator.clone()
        }
    }
}

impl TryFrom<BenchmarkArgs> for BenchmarkConfig {
    type Error = CliError;

    fn try_from(args: BenchmarkArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_BENCHMARK_DATABASE,
        })?;
        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            min_size: args.min_size.unwrap_or(defaults.min_size),
            max_size: args.max_size.unwrap_or(defaults.max_size),
            max_value: args.max_value.unwrap_or(defaults.max_value),
            density: defaults.density,
            target_style: if args.partition {
                TargetStyle::Partition
            } else {
                TargetStyle::Fraction
            },
            seed: args.seed.unwrap_or(defaults.seed),
        };
        generator.validate()?;
        Ok(Self {
            database,
            instances: args.instances.unwrap_or(DEFAULT_INSTANCES),
            generator,
        })
    }
}

pub(super) fn run_benchmark(args: BenchmarkArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_benchmark_with(args, &mut stdout)
}

pub(super) fn run_benchmark_with(
    args: BenchmarkArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = execute_benchmark(&config)?;
    write_json(writer, &summary)
}

pub(super) fn execute_benchmark(config: &BenchmarkConfig) -> Result<RunSummary, CliError> {
    let mut store =
        SqliteResultStore::open(&config.database).map_err(|source| CliError::Store {
            path: config.database.clone(),
            source: Box::new(source),
        })?;
    let solvers: Vec<Box<dyn Solver>> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| solver_for(algorithm, &SolversConfig::default()))
        .collect();
    let runner = BenchmarkRunner::new(&solvers);

    let mut summary = RunSummary::default();
    for density in Density::ALL {
        log::info!(
            "benchmarking {} {density} instances into {}",
            config.instances,
            config.database
        );
        let mut generator = InstanceGenerator::new(config.generator_for(density))?;
        let pass = runner
            .run(&mut generator, &mut store, config.instances)
            .map_err(|source| CliError::Run {
                path: config.database.clone(),
                source: Box::new(source),
            })?;
        summary.absorb(pass);
    }
    Ok(summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BenchmarkConfig, CliError> {
    let merged = BenchmarkArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BenchmarkConfig::try_from(merged)
}
