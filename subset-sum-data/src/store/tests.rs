//! Unit tests for the SQLite result store.

use super::*;
use rstest::{fixture, rstest};
use subset_sum_core::SolverResult;
use subset_sum_core::test_support::instance;
use tempfile::TempDir;

#[fixture]
fn store() -> SqliteResultStore {
    SqliteResultStore::open_in_memory().expect("open in-memory store")
}

fn solved_record(density: Option<Density>, operations: u64) -> SolveRecord {
    SolveRecord {
        instance: instance(&[3, 34, 4, 12, 5, 2], 9),
        density,
        result: SolverResult::solved(
            Algorithm::MeetInTheMiddle,
            vec![3, 4, 2],
            operations,
            Duration::from_micros(1_500),
        ),
    }
}

#[rstest]
fn open_creates_parent_directories_and_schema() {
    let temp = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp path");
    let path = root.join("nested/results.sqlite");

    let mut store = SqliteResultStore::open(&path).expect("open store");
    store
        .record(&solved_record(None, 3))
        .expect("record result");
    drop(store);

    let reopened = SqliteResultStore::open(&path).expect("reopen store");
    assert_eq!(reopened.records().expect("read records").len(), 1);
}

#[rstest]
fn records_round_trip(mut store: SqliteResultStore) {
    store
        .record(&solved_record(Some(Density::Dense), 3))
        .expect("record result");

    let records = store.records().expect("read records");
    assert_eq!(
        records,
        vec![StoredRecord {
            algorithm: Algorithm::MeetInTheMiddle,
            set: vec![3, 34, 4, 12, 5, 2],
            target: 9,
            density: Some(Density::Dense),
            found: true,
            solution: vec![3, 4, 2],
            operations: 3,
            elapsed: Duration::from_micros(1_500),
        }]
    );
}

#[rstest]
fn rerecording_replaces_the_previous_row(mut store: SqliteResultStore) {
    store
        .record(&solved_record(None, 3))
        .expect("record result");
    store
        .record(&solved_record(None, 8))
        .expect("record result again");

    let records = store.records().expect("read records");
    assert_eq!(records.len(), 1);
    assert_eq!(records.first().map(|record| record.operations), Some(8));
}

#[rstest]
fn filters_by_density(mut store: SqliteResultStore) {
    store
        .record(&solved_record(Some(Density::Dense), 3))
        .expect("record dense");
    let mut sparse = solved_record(Some(Density::Sparse), 3);
    sparse.result.algorithm = Algorithm::Backtracking;
    store.record(&sparse).expect("record sparse");

    let dense = store
        .records_with_density(Density::Dense)
        .expect("read dense records");
    assert_eq!(dense.len(), 1);
    assert!(dense.iter().all(|record| record.density == Some(Density::Dense)));
    assert_eq!(store.records().expect("read records").len(), 2);
}

#[rstest]
fn rejects_targets_beyond_sqlite_range(mut store: SqliteResultStore) {
    let record = SolveRecord {
        instance: instance(&[1], u64::MAX),
        density: None,
        result: SolverResult::unsolved(Algorithm::DynamicProgramming, 0, Duration::ZERO),
    };
    let err = store.record(&record).expect_err("target overflows i64");
    assert!(matches!(
        err,
        StoreError::ValueOutOfRange {
            field: "target",
            ..
        }
    ));
}

#[rstest]
#[case("INSERT INTO solve_records VALUES ('Simulated Annealing', '[1]', 1, NULL, 1, '[1]', 1, 1)")]
#[case("INSERT INTO solve_records VALUES ('Backtracking', '[1]', -1, NULL, 0, '[]', 1, 1)")]
#[case("INSERT INTO solve_records VALUES ('Backtracking', 'not json', 1, NULL, 0, '[]', 1, 1)")]
#[case("INSERT INTO solve_records VALUES ('Backtracking', '[1]', 1, 'medium', 0, '[]', 1, 1)")]
fn malformed_rows_surface_typed_errors(store: SqliteResultStore, #[case] insert: &str) {
    store
        .connection
        .execute(insert, [])
        .expect("insert malformed row");
    let err = store.records().expect_err("row should fail to decode");
    assert!(matches!(
        err,
        StoreError::DecodeAlgorithm { .. }
            | StoreError::NegativeValue { .. }
            | StoreError::DecodeJson { .. }
            | StoreError::DecodeDensity { .. }
    ));
}
