//! Tests for the `DynamicProgrammingSolver`.

use super::*;
use rstest::{fixture, rstest};
use subset_sum_core::test_support::instance;

#[fixture]
fn classic() -> Instance {
    instance(&[3, 34, 4, 12, 5, 2], 9)
}

fn compact() -> DynamicProgrammingSolver {
    DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        mode: DpMode::Compact,
        ..DynamicProgrammingConfig::default()
    })
}

#[rstest]
fn full_table_walks_back_from_the_last_row(classic: Instance) {
    let result = DynamicProgrammingSolver::new()
        .solve(&classic)
        .expect("classic instance fits the table");
    assert!(result.found);
    assert_eq!(result.solution, vec![5, 4]);
    // (n + 1) base cells, then n * T interior cells.
    assert_eq!(result.operations, 7 + 6 * 9);
    assert!(result.is_witness_for(&classic));
}

#[rstest]
fn full_table_is_returned_with_expected_shape(classic: Instance) {
    let result = DynamicProgrammingSolver::new()
        .solve(&classic)
        .expect("classic instance fits the table");
    let table = result.table.expect("full-table mode returns its table");
    assert_eq!((table.rows(), table.columns()), (7, 10));
    assert!(table.iter_rows().all(|row| row.first() == Some(&true)));
    assert_eq!(table.get(6, 9), Some(true));
    assert_eq!(table.get(1, 9), Some(false));
}

#[rstest]
fn compact_mode_stops_once_target_is_reached(classic: Instance) {
    let result = compact().solve(&classic).expect("target is within limit");
    assert!(result.found);
    assert_eq!(result.solution, vec![4, 5]);
    assert_eq!(result.operations, 6);
    assert!(result.table.is_none());
}

#[rstest]
#[case(DpMode::FullTable, 16)]
#[case(DpMode::Compact, 3)]
fn reports_no_solution(#[case] mode: DpMode, #[case] operations: u64) {
    let solver = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        mode,
        ..DynamicProgrammingConfig::default()
    });
    let result = solver
        .solve(&instance(&[1, 2, 5], 4))
        .expect("small instance");
    assert!(!result.found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, operations);
}

#[rstest]
#[case(DpMode::FullTable, 0, true, 1)]
#[case(DpMode::FullTable, 3, false, 1)]
#[case(DpMode::Compact, 0, true, 0)]
#[case(DpMode::Compact, 3, false, 0)]
fn empty_set_boundaries(
    #[case] mode: DpMode,
    #[case] target: u64,
    #[case] found: bool,
    #[case] operations: u64,
) {
    let solver = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        mode,
        ..DynamicProgrammingConfig::default()
    });
    let result = solver.solve(&instance(&[], target)).expect("empty set");
    assert_eq!(result.found, found);
    assert!(result.solution.is_empty());
    assert_eq!(result.operations, operations);
}

#[rstest]
fn duplicates_are_used_at_most_once() {
    let set = instance(&[10, 10, 10], 20);
    let result = DynamicProgrammingSolver::new()
        .solve(&set)
        .expect("small instance");
    assert_eq!(result.solution, vec![10, 10]);
    assert!(!DynamicProgrammingSolver::new()
        .solve(&instance(&[10, 10, 10], 40))
        .expect("small instance")
        .found);
}

#[rstest]
fn oversized_table_is_rejected_before_allocation() {
    let solver = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        max_table_cells: 10,
        ..DynamicProgrammingConfig::default()
    });
    let err = solver
        .solve(&instance(&[1, 2], 100))
        .expect_err("table exceeds ceiling");
    assert_eq!(
        err,
        SolveError::ResourceExhausted(ResourceExhausted::TableTooLarge {
            cells: 303,
            limit: 10
        })
    );
}

#[rstest]
fn compact_mode_rejects_targets_above_ceiling(classic: Instance) {
    let solver = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        mode: DpMode::Compact,
        max_target: 5,
        ..DynamicProgrammingConfig::default()
    });
    let err = solver.solve(&classic).expect_err("target exceeds ceiling");
    assert_eq!(
        err,
        SolveError::ResourceExhausted(ResourceExhausted::TargetTooLarge {
            target: 9,
            limit: 5
        })
    );
}

#[rstest]
fn trace_is_recorded_only_on_request() {
    let set = instance(&[1, 2], 3);
    let quiet = DynamicProgrammingSolver::new()
        .solve(&set)
        .expect("small instance");
    assert!(quiet.trace.is_empty());

    let traced = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        trace: true,
        ..DynamicProgrammingConfig::default()
    })
    .solve(&set)
    .expect("small instance");
    assert_eq!(
        traced.trace.first().map(String::as_str),
        Some("dp[0][0] = true (empty sub-collection)")
    );
    assert_eq!(traced.trace.len(), 9);
    assert_eq!(
        traced.trace.last().map(String::as_str),
        Some("dp[2][3] = true (include 2)")
    );
}

#[rstest]
fn compact_trace_lists_each_new_sum(classic: Instance) {
    let solver = DynamicProgrammingSolver::with_config(DynamicProgrammingConfig {
        mode: DpMode::Compact,
        trace: true,
        ..DynamicProgrammingConfig::default()
    });
    let result = solver.solve(&classic).expect("target is within limit");
    assert_eq!(result.trace.len(), 6);
    assert_eq!(result.trace.last().map(String::as_str), Some("reach 9 = 4 + 5"));
}
