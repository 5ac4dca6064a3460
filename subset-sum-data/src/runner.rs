//! Benchmark runs: generate, solve with every algorithm, record.

use serde::{Deserialize, Serialize};
use subset_sum_core::{Algorithm, InstanceSource, ResultSink, SolveRecord, Solver};
use thiserror::Error;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Instances generated.
    pub instances: usize,
    /// Results written to the sink.
    pub recorded: usize,
    /// Solves that returned an error.
    pub failures: usize,
}

impl RunSummary {
    /// Add another run's counts to this one.
    pub const fn absorb(&mut self, other: Self) {
        self.instances += other.instances;
        self.recorded += other.recorded;
        self.failures += other.failures;
    }
}

/// Failures that abort a run.
#[derive(Debug, Error)]
pub enum RunError<G, S>
where
    G: std::error::Error + 'static,
    S: std::error::Error + 'static,
{
    /// The instance source failed.
    #[error("failed to generate instance {index}")]
    Generate {
        /// Zero-based instance number.
        index: usize,
        /// Error raised by the source.
        #[source]
        source: G,
    },
    /// The result sink failed.
    #[error("failed to record {algorithm} result for instance {index}")]
    Record {
        /// Zero-based instance number.
        index: usize,
        /// Algorithm whose result was being recorded.
        algorithm: Algorithm,
        /// Error raised by the sink.
        #[source]
        source: S,
    },
}

/// Runs every configured solver over generated instances.
///
/// A solver error is logged and counted; the remaining solvers still run.
///
/// # Examples
///
/// ```
/// use subset_sum_core::Algorithm;
/// use subset_sum_data::{BenchmarkRunner, GeneratorConfig, InstanceGenerator, SqliteResultStore};
/// use subset_sum_solvers::{SolversConfig, solver_for};
///
/// let solvers: Vec<_> = Algorithm::ALL
///     .into_iter()
///     .map(|algorithm| solver_for(algorithm, &SolversConfig::default()))
///     .collect();
/// let mut source = InstanceGenerator::new(GeneratorConfig::default()).unwrap();
/// let mut store = SqliteResultStore::open_in_memory().unwrap();
///
/// let summary = BenchmarkRunner::new(&solvers)
///     .run(&mut source, &mut store, 2)
///     .unwrap();
/// assert_eq!(summary.recorded, 6);
/// ```
pub struct BenchmarkRunner<'a> {
    solvers: &'a [Box<dyn Solver>],
}

impl<'a> BenchmarkRunner<'a> {
    /// Run `solvers`, in order, on every instance.
    #[must_use]
    pub const fn new(solvers: &'a [Box<dyn Solver>]) -> Self {
        Self { solvers }
    }

    /// Generate `count` instances from `source` and record each solver's
    /// result in `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] as soon as the source or the sink fails.
    pub fn run<I, K>(
        &self,
        source: &mut I,
        sink: &mut K,
        count: usize,
    ) -> Result<RunSummary, RunError<I::Error, K::Error>>
    where
        I: InstanceSource,
        K: ResultSink,
    {
        let mut summary = RunSummary::default();
        for index in 0..count {
            let instance = source
                .generate()
                .map_err(|err| RunError::Generate { index, source: err })?;
            let density = source.density();
            summary.instances += 1;

            for solver in self.solvers {
                let algorithm = solver.algorithm();
                let result = match solver.solve(&instance) {
                    Ok(result) => result,
                    Err(err) => {
                        log::warn!(
                            "{algorithm} failed on instance {index} ({} elements, target {}): {err}",
                            instance.len(),
                            instance.target()
                        );
                        summary.failures += 1;
                        continue;
                    }
                };
                let record = SolveRecord {
                    instance: instance.clone(),
                    density,
                    result,
                };
                sink.record(&record).map_err(|err| RunError::Record {
                    index,
                    algorithm,
                    source: err,
                })?;
                summary.recorded += 1;
            }
        }
        log::info!(
            "benchmark run finished: {} instances, {} results recorded, {} failures",
            summary.instances,
            summary.recorded,
            summary.failures
        );
        Ok(summary)
    }
}
