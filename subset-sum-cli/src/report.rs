//! Report command: aggregate a results database.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use subset_sum_core::Density;
use subset_sum_data::{Report, SqliteResultStore};

use crate::{ARG_DATABASE, CliError, ENV_REPORT_DATABASE, require_existing, write_json};

const ARG_REPORT_DENSITY: &str = "density";

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Summarise stored benchmark results as JSON")]
#[ortho_config(prefix = "SUBSET_SUM")]
pub(crate) struct ReportArgs {
    /// SQLite database written by `benchmark`.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Only aggregate records of this density.
    #[arg(long = ARG_REPORT_DENSITY, value_name = "density")]
    #[serde(default)]
    pub(crate) density: Option<Density>,
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) density: Option<Density>,
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_REPORT_DATABASE,
        })?;
        Ok(Self {
            database,
            density: args.density,
        })
    }
}

pub(super) fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_report_with(args, &mut stdout)
}

pub(super) fn run_report_with(args: ReportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = ReportConfig::try_from(merged)?;
    // Opening would silently create an empty database.
    require_existing(&config.database, ARG_DATABASE)?;
    let report = build_report(&config)?;
    write_json(writer, &report)
}

fn build_report(config: &ReportConfig) -> Result<Report, CliError> {
    let store_error = |source| CliError::Store {
        path: config.database.clone(),
        source: Box::new(source),
    };
    let store = SqliteResultStore::open(&config.database).map_err(store_error)?;
    let records = config
        .density
        .map_or_else(|| store.records(), |density| store.records_with_density(density))
        .map_err(store_error)?;
    log::info!("aggregating {} records from {}", records.len(), config.database);
    Ok(Report::from_records(&records))
}
