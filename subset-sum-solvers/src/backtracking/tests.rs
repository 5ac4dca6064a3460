//! Tests for the `BacktrackingSolver`.

use super::*;
use rstest::rstest;
use subset_sum_core::test_support::instance;

#[rstest]
fn suffix_sums_end_in_zero() {
    assert_eq!(suffix_sums(&[34, 12, 5]), vec![51, 17, 5, 0]);
    assert_eq!(suffix_sums(&[]), vec![0]);
}

#[rstest]
fn explores_large_elements_first() {
    let classic = instance(&[3, 34, 4, 12, 5, 2], 9);
    let result = BacktrackingSolver::new()
        .solve(&classic)
        .expect("no time limit");
    assert!(result.found);
    assert_eq!(result.solution, vec![5, 4]);
    assert_eq!(result.operations, 4);
    assert!(result.is_witness_for(&classic));
}

#[rstest]
fn suffix_bound_prunes_hopeless_branches() {
    let result = BacktrackingSolver::new()
        .solve(&instance(&[1, 2, 5], 4))
        .expect("no time limit");
    assert!(!result.found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, 1);
}

#[rstest]
#[case(0, true)]
#[case(3, false)]
fn empty_set_needs_no_expansion(#[case] target: u64, #[case] found: bool) {
    let result = BacktrackingSolver::new()
        .solve(&instance(&[], target))
        .expect("no time limit");
    assert_eq!(result.found, found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, 0);
}

#[rstest]
fn repeated_states_are_expanded_once() {
    // Twelve equal values reach at most seven distinct even sums per position.
    let set = instance(&[2; 12], 13);
    let result = BacktrackingSolver::new().solve(&set).expect("no time limit");
    assert!(!result.found);
    assert!(result.operations <= 12 * 7);
}

#[rstest]
fn handles_sets_deeper_than_the_call_stack_would_allow() {
    let values = vec![1_u64; 50_000];
    let set = instance(&values, 50_000);
    let result = BacktrackingSolver::new().solve(&set).expect("no time limit");
    assert!(result.found);
    assert_eq!(result.solution.len(), 50_000);
}

#[rstest]
fn expired_deadline_aborts_the_search() {
    let solver = BacktrackingSolver::with_config(BacktrackingConfig {
        time_limit: Some(Duration::ZERO),
        check_interval: 1,
        ..BacktrackingConfig::default()
    });
    let err = solver
        .solve(&instance(&[1, 2, 5], 4))
        .expect_err("deadline has already passed");
    assert_eq!(
        err,
        SolveError::TimeLimitExceeded {
            limit: Duration::ZERO,
            operations: 1
        }
    );
}

#[rstest]
fn generous_deadline_does_not_interfere() {
    let solver = BacktrackingSolver::with_config(BacktrackingConfig {
        time_limit: Some(Duration::from_secs(60)),
        check_interval: 1,
        ..BacktrackingConfig::default()
    });
    let result = solver
        .solve(&instance(&[3, 34, 4, 12, 5, 2], 9))
        .expect("well within the limit");
    assert_eq!(result.solution, vec![5, 4]);
}

#[rstest]
fn trace_records_expansions_and_prunes() {
    let solver = BacktrackingSolver::with_config(BacktrackingConfig {
        trace: true,
        ..BacktrackingConfig::default()
    });
    let result = solver
        .solve(&instance(&[1, 2, 5], 4))
        .expect("no time limit");
    assert_eq!(
        result.trace,
        vec![
            "expand position 0 with sum 0: try 5".to_owned(),
            "prune position 1: at most 3 of 4 reachable".to_owned(),
        ]
    );
}
