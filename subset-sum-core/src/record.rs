//! Boundaries to the collaborators around the engine.
//!
//! Instance generation and result persistence live outside the solvers.
//! These narrow traits let a caller plug in a generator or a store without
//! the solvers ever touching I/O or randomness.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Instance, SolverResult};

/// How densely an instance's values are packed.
///
/// Dense instances draw from a small value range relative to the set size;
/// sparse instances draw from a large one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Density {
    /// Small maximum element value.
    Dense,
    /// Large maximum element value.
    Sparse,
}

impl Density {
    /// Both densities, dense first.
    pub const ALL: [Self; 2] = [Self::Dense, Self::Sparse];

    /// Lowercase label used in stored records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a density label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown density {input:?} (expected dense or sparse)")]
pub struct ParseDensityError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Density {
    type Err = ParseDensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            _ => Err(ParseDensityError {
                input: s.to_owned(),
            }),
        }
    }
}

/// A flat record of one solve: the instance, its origin and the result.
///
/// Stores key records by at least algorithm, set and target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveRecord {
    /// The solved instance.
    pub instance: Instance,
    /// Density label of a generated instance, if known.
    pub density: Option<Density>,
    /// What the solver produced.
    pub result: SolverResult,
}

/// Supplies instances to solve.
pub trait InstanceSource {
    /// Failure raised while producing an instance.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce the next instance.
    ///
    /// # Errors
    ///
    /// Implementations return their own error type when no valid instance
    /// can be produced.
    fn generate(&mut self) -> Result<Instance, Self::Error>;

    /// Density label attached to generated instances, if any.
    fn density(&self) -> Option<Density> {
        None
    }
}

/// Persists solve records.
pub trait ResultSink {
    /// Failure raised while recording.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Record one solve.
    ///
    /// # Errors
    ///
    /// Implementations return their own error type when persisting fails.
    fn record(&mut self, record: &SolveRecord) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dense", Density::Dense)]
    #[case(" Sparse", Density::Sparse)]
    fn parses_density_labels(#[case] input: &str, #[case] expected: Density) {
        assert_eq!(input.parse::<Density>(), Ok(expected));
    }

    #[rstest]
    fn labels_round_trip() {
        for density in Density::ALL {
            assert_eq!(density.to_string().parse::<Density>(), Ok(density));
        }
    }

    #[rstest]
    fn rejects_unknown_density() {
        assert!("medium".parse::<Density>().is_err());
    }
}
