//! Identifiers for the solving strategies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The algorithm that produced a result.
///
/// Choosing one is always the caller's decision; nothing in the engine picks
/// an algorithm from the shape of an instance.
///
/// # Examples
///
/// ```
/// use subset_sum_core::Algorithm;
///
/// let algorithm: Algorithm = "mitm".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::MeetInTheMiddle);
/// assert_eq!(algorithm.to_string(), "Meet In The Middle");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Algorithm {
    /// Reachability over partial sums.
    #[cfg_attr(feature = "serde", serde(alias = "dp"))]
    DynamicProgramming,
    /// Enumerate both halves and match complementary sums.
    #[cfg_attr(feature = "serde", serde(alias = "mitm"))]
    MeetInTheMiddle,
    /// Pruned include/exclude search.
    Backtracking,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Self; 3] = [
        Self::DynamicProgramming,
        Self::MeetInTheMiddle,
        Self::Backtracking,
    ];

    /// Human-readable name used as the record key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DynamicProgramming => "Dynamic Programming",
            Self::MeetInTheMiddle => "Meet In The Middle",
            Self::Backtracking => "Backtracking",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {input:?} (expected dp, mitm or backtracking)")]
pub struct ParseAlgorithmError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '_' => ' ',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalised.as_str() {
            "dp" | "dynamic programming" => Ok(Self::DynamicProgramming),
            "mitm" | "meet in the middle" => Ok(Self::MeetInTheMiddle),
            "bt" | "backtracking" => Ok(Self::Backtracking),
            _ => Err(ParseAlgorithmError {
                input: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dp", Algorithm::DynamicProgramming)]
    #[case("Dynamic Programming", Algorithm::DynamicProgramming)]
    #[case("dynamic-programming", Algorithm::DynamicProgramming)]
    #[case("MITM", Algorithm::MeetInTheMiddle)]
    #[case("meet_in_the_middle", Algorithm::MeetInTheMiddle)]
    #[case(" backtracking ", Algorithm::Backtracking)]
    fn parses_names_and_aliases(#[case] input: &str, #[case] expected: Algorithm) {
        assert_eq!(input.parse::<Algorithm>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_names() {
        let err = "greedy".parse::<Algorithm>().expect_err("unknown name");
        assert_eq!(err.input, "greedy");
    }

    #[rstest]
    fn display_round_trips_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }
}
