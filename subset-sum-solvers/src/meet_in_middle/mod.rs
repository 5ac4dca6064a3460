//! Meet-in-the-middle search, `O(2^(n/2))` time and space.
//!
//! The set is split at the floor midpoint. Every sub-collection sum of each
//! half that does not exceed the target is enumerated once, keeping the first
//! mask that produced it. Each first-half sum is then paired with a lookup of
//! its complement in the second half.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Instant;

use subset_sum_core::{Algorithm, Instance, ResourceExhausted, SolveError, Solver, SolverResult};

use crate::trace::Trace;

/// Masks are `u64`, so no half may exceed this many elements.
const MAX_ENUMERABLE_HALF: usize = 63;

/// How second-half sums are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HalfLookup {
    /// Hash map keyed by sum.
    #[default]
    Hashed,
    /// Sorted vector searched by bisection.
    Sorted,
}

/// Configuration for [`MeetInMiddleSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetInMiddleConfig {
    /// Second-half lookup structure.
    pub lookup: HalfLookup,
    /// Longest half the solver will enumerate.
    pub max_half_len: usize,
    /// Record each probe.
    pub trace: bool,
}

impl Default for MeetInMiddleConfig {
    fn default() -> Self {
        Self {
            lookup: HalfLookup::Hashed,
            max_half_len: 20,
            trace: false,
        }
    }
}

/// Splits the set in two and joins the halves through a sum lookup.
///
/// # Examples
///
/// ```
/// use subset_sum_core::{Instance, Solver};
/// use subset_sum_solvers::MeetInMiddleSolver;
///
/// let instance = Instance::new(vec![3, 34, 4, 12, 5, 2], 9).unwrap();
/// let result = MeetInMiddleSolver::new().solve(&instance).unwrap();
/// assert_eq!(result.solution, vec![3, 4, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeetInMiddleSolver {
    config: MeetInMiddleConfig,
}

impl MeetInMiddleSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: MeetInMiddleConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &MeetInMiddleConfig {
        &self.config
    }

    fn check_halves(&self, len: usize) -> Result<usize, ResourceExhausted> {
        #[expect(
            clippy::integer_division,
            reason = "the first half takes the floor of n / 2"
        )]
        let split = len / 2;
        let larger = len - split;
        let limit = self.config.max_half_len.min(MAX_ENUMERABLE_HALF);
        if larger > limit {
            return Err(ResourceExhausted::HalfTooLarge {
                len: larger,
                limit,
            });
        }
        Ok(split)
    }
}

impl Solver for MeetInMiddleSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MeetInTheMiddle
    }

    fn solve(&self, instance: &Instance) -> Result<SolverResult, SolveError> {
        let started_at = Instant::now();
        let split = self.check_halves(instance.len())?;
        let (first_half, second_half) = instance.set().split_at(split);
        let target = instance.target();
        let mut trace = Trace::new(self.config.trace);

        let first = HalfSumIndex::build(first_half, target, HalfLookup::Hashed);
        let second = HalfSumIndex::build(second_half, target, self.config.lookup);
        trace.record(|| {
            format!(
                "first half: {} distinct sums, second half: {} distinct sums",
                first.len(),
                second.len()
            )
        });

        let mut operations = 0_u64;
        let mut witness = None;
        for &(sum, mask) in first.entries() {
            operations += 1;
            let complement = target - sum;
            let matched = second.find(complement);
            trace.record(|| match matched {
                Some(_) => format!("sum {sum} pairs with second-half sum {complement}"),
                None => format!("sum {sum} has no second-half complement {complement}"),
            });
            if let Some(other) = matched {
                witness = Some((mask, other));
                break;
            }
        }

        let result = match witness {
            Some((mask, other)) => {
                let mut solution = select(first_half, mask);
                solution.extend(select(second_half, other));
                SolverResult::solved(
                    Algorithm::MeetInTheMiddle,
                    solution,
                    operations,
                    started_at.elapsed(),
                )
            }
            None => {
                SolverResult::unsolved(Algorithm::MeetInTheMiddle, operations, started_at.elapsed())
            }
        };
        log::debug!(
            "meet in the middle ({:?}) on {} elements, target {}: found={} operations={} elapsed={:?}",
            self.config.lookup,
            instance.len(),
            target,
            result.found,
            result.operations,
            result.elapsed,
        );
        Ok(result.with_trace(trace.into_lines()))
    }
}

/// Distinct sub-collection sums of one half, each with the first mask that
/// produced it.
#[derive(Debug)]
struct HalfSumIndex {
    /// Entries in enumeration order.
    entries: Vec<(u64, u64)>,
    lookup: SumLookup,
}

#[derive(Debug)]
enum SumLookup {
    Hashed(HashMap<u64, u64>),
    Sorted(Vec<(u64, u64)>),
}

impl HalfSumIndex {
    /// Enumerate `half`, discarding sums above `cap`.
    fn build(half: &[u64], cap: u64, lookup: HalfLookup) -> Self {
        let mut first_seen: HashMap<u64, u64> = HashMap::new();
        let mut entries = Vec::new();
        for (sum, mask) in SubsetSums::new(half) {
            if sum > cap {
                continue;
            }
            if let Entry::Vacant(slot) = first_seen.entry(sum) {
                slot.insert(mask);
                entries.push((sum, mask));
            }
        }
        let lookup = match lookup {
            HalfLookup::Hashed => SumLookup::Hashed(first_seen),
            HalfLookup::Sorted => {
                let mut sorted = entries.clone();
                sorted.sort_unstable_by_key(|&(sum, _)| sum);
                SumLookup::Sorted(sorted)
            }
        };
        Self { entries, lookup }
    }

    fn entries(&self) -> &[(u64, u64)] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Mask of the first sub-collection summing to `sum`.
    fn find(&self, sum: u64) -> Option<u64> {
        match &self.lookup {
            SumLookup::Hashed(map) => map.get(&sum).copied(),
            SumLookup::Sorted(sorted) => sorted
                .binary_search_by_key(&sum, |&(candidate, _)| candidate)
                .ok()
                .and_then(|position| sorted.get(position))
                .map(|&(_, mask)| mask),
        }
    }
}

/// Every `(sum, mask)` of a slice in Gray-code order, so consecutive masks
/// differ by one element and each sum is one addition or subtraction away
/// from the last.
struct SubsetSums<'a> {
    half: &'a [u64],
    step: u64,
    steps: u64,
    mask: u64,
    sum: u64,
}

impl<'a> SubsetSums<'a> {
    fn new(half: &'a [u64]) -> Self {
        let steps = u32::try_from(half.len())
            .ok()
            .and_then(|len| 1_u64.checked_shl(len))
            .unwrap_or(u64::MAX);
        Self {
            half,
            step: 0,
            steps,
            mask: 0,
            sum: 0,
        }
    }
}

impl Iterator for SubsetSums<'_> {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.steps {
            return None;
        }
        if self.step > 0 {
            let bit = self.step.trailing_zeros();
            let flag = 1_u64 << bit;
            let value = usize::try_from(bit)
                .ok()
                .and_then(|index| self.half.get(index))
                .copied()
                .unwrap_or(0);
            if self.mask & flag == 0 {
                self.sum += value;
            } else {
                self.sum -= value;
            }
            self.mask ^= flag;
        }
        self.step += 1;
        Some((self.sum, self.mask))
    }
}

/// Elements of `half` selected by `mask`, in index order.
fn select(half: &[u64], mask: u64) -> Vec<u64> {
    half.iter()
        .enumerate()
        .filter(|&(bit, _)| {
            u32::try_from(bit)
                .ok()
                .and_then(|shift| 1_u64.checked_shl(shift))
                .is_some_and(|flag| mask & flag != 0)
        })
        .map(|(_, &value)| value)
        .collect()
}

#[cfg(test)]
mod tests;
