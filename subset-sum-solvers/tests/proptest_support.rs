//! Proptest strategies for solver property tests.
//!
//! Instances are kept small enough for the brute-force oracle and for the
//! full dynamic programming table.

use proptest::prelude::*;
use subset_sum_core::Instance;

/// Largest element drawn by [`instance_strategy`].
pub const MAX_VALUE: u64 = 60;

/// Strategy for valid instances of up to `max_len` elements.
///
/// Targets range slightly past the set total so unreachable targets are
/// generated as well as reachable ones.
pub fn instance_strategy(max_len: usize) -> impl Strategy<Value = Instance> {
    proptest::collection::vec(1..=MAX_VALUE, 0..=max_len).prop_flat_map(|set| {
        let total: u64 = set.iter().sum();
        (Just(set), 0..=total + 3).prop_map(|(values, target)| {
            Instance::new(values, target).expect("generated values are positive and small")
        })
    })
}

/// Strategy for instances guaranteed to have a solution: the target is the
/// sum of a random sub-collection.
pub fn feasible_instance_strategy(max_len: usize) -> impl Strategy<Value = Instance> {
    proptest::collection::vec((1..=MAX_VALUE, any::<bool>()), 0..=max_len).prop_map(|picks| {
        let target = picks
            .iter()
            .filter(|(_, chosen)| *chosen)
            .map(|(value, _)| value)
            .sum();
        let values = picks.into_iter().map(|(value, _)| value).collect();
        Instance::new(values, target).expect("generated values are positive and small")
    })
}
