//! Tests for the `MeetInMiddleSolver`.

use super::*;
use rstest::rstest;
use subset_sum_core::test_support::instance;

fn solver(lookup: HalfLookup) -> MeetInMiddleSolver {
    MeetInMiddleSolver::with_config(MeetInMiddleConfig {
        lookup,
        ..MeetInMiddleConfig::default()
    })
}

#[rstest]
fn gray_code_enumeration_visits_every_subset_once() {
    let sums: Vec<(u64, u64)> = SubsetSums::new(&[3, 34, 4]).collect();
    assert_eq!(
        sums,
        vec![
            (0, 0b000),
            (3, 0b001),
            (37, 0b011),
            (34, 0b010),
            (38, 0b110),
            (41, 0b111),
            (7, 0b101),
            (4, 0b100),
        ]
    );
}

#[rstest]
fn empty_half_has_only_the_empty_sum() {
    assert_eq!(SubsetSums::new(&[]).collect::<Vec<_>>(), vec![(0, 0)]);
}

#[rstest]
#[case(HalfLookup::Hashed)]
#[case(HalfLookup::Sorted)]
fn index_keeps_first_mask_per_sum(#[case] lookup: HalfLookup) {
    let index = HalfSumIndex::build(&[2, 2, 5], 6, lookup);
    assert_eq!(
        index.entries(),
        &[(0, 0), (2, 0b001), (4, 0b011), (5, 0b100)]
    );
    assert_eq!(index.find(2), Some(0b001));
    assert_eq!(index.find(6), None);
}

#[rstest]
#[case(HalfLookup::Hashed)]
#[case(HalfLookup::Sorted)]
fn joins_halves_on_the_classic_instance(#[case] lookup: HalfLookup) {
    let classic = instance(&[3, 34, 4, 12, 5, 2], 9);
    let result = solver(lookup).solve(&classic).expect("six elements");
    assert!(result.found);
    assert_eq!(result.solution, vec![3, 4, 2]);
    assert_eq!(result.operations, 3);
    assert!(result.is_witness_for(&classic));
}

#[rstest]
#[case(HalfLookup::Hashed)]
#[case(HalfLookup::Sorted)]
fn reports_no_solution(#[case] lookup: HalfLookup) {
    let result = solver(lookup)
        .solve(&instance(&[1, 2, 5], 4))
        .expect("three elements");
    assert!(!result.found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, 2);
}

#[rstest]
#[case(0, true)]
#[case(3, false)]
fn empty_set_probes_once(#[case] target: u64, #[case] found: bool) {
    let result = MeetInMiddleSolver::new()
        .solve(&instance(&[], target))
        .expect("empty set");
    assert_eq!(result.found, found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, 1);
}

#[rstest]
fn single_element_lives_in_the_second_half() {
    let result = MeetInMiddleSolver::new()
        .solve(&instance(&[7], 7))
        .expect("one element");
    assert_eq!(result.solution, vec![7]);
}

#[rstest]
fn rejects_halves_above_limit() {
    let solver = MeetInMiddleSolver::with_config(MeetInMiddleConfig {
        max_half_len: 2,
        ..MeetInMiddleConfig::default()
    });
    let err = solver
        .solve(&instance(&[1, 2, 3, 4, 5], 6))
        .expect_err("second half has three elements");
    assert_eq!(
        err,
        SolveError::ResourceExhausted(ResourceExhausted::HalfTooLarge { len: 3, limit: 2 })
    );
}

#[rstest]
fn trace_summarises_halves_and_probes() {
    let solver = MeetInMiddleSolver::with_config(MeetInMiddleConfig {
        trace: true,
        ..MeetInMiddleConfig::default()
    });
    let result = solver
        .solve(&instance(&[3, 34, 4, 12, 5, 2], 9))
        .expect("six elements");
    assert_eq!(
        result.trace,
        vec![
            "first half: 4 distinct sums, second half: 4 distinct sums".to_owned(),
            "sum 0 has no second-half complement 9".to_owned(),
            "sum 3 has no second-half complement 6".to_owned(),
            "sum 7 pairs with second-half sum 2".to_owned(),
        ]
    );
}
