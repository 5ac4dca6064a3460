//! SQLite persistence for solve records.
//!
//! Each solve is one row of `solve_records`, keyed by algorithm, set and
//! target. Sets and witnesses are stored as JSON arrays; integers that do not
//! fit SQLite's signed 64-bit range are rejected rather than truncated.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::{Connection, Error as SqliteError, Params};
use serde::{Deserialize, Serialize};
use subset_sum_core::{
    Algorithm, Density, ParseAlgorithmError, ParseDensityError, ResultSink, SolveRecord,
};
use thiserror::Error;

use crate::fs::ensure_parent_dir;

/// Errors raised by [`SqliteResultStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create the parent directory for the database.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the `solve_records` table failed.
    #[error("failed to create solve_records table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An integer could not be represented as an SQLite integer.
    #[error("{field} value {value} exceeds SQLite i64 range")]
    ValueOutOfRange {
        /// Column being written.
        field: &'static str,
        /// Rejected value.
        value: u128,
    },
    /// Serialising a JSON column failed.
    #[error("failed to serialise {field} as JSON")]
    EncodeJson {
        /// Column being written.
        field: &'static str,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing a row failed.
    #[error("failed to persist {algorithm} result")]
    Insert {
        /// Algorithm of the record being written.
        algorithm: Algorithm,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Reading rows failed.
    #[error("failed to query solve records")]
    Query {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A stored algorithm name is not recognised.
    #[error("stored algorithm is not recognised")]
    DecodeAlgorithm {
        /// Parse failure.
        #[source]
        source: ParseAlgorithmError,
    },
    /// A stored density label is not recognised.
    #[error("stored density is not recognised")]
    DecodeDensity {
        /// Parse failure.
        #[source]
        source: ParseDensityError,
    },
    /// A stored JSON column is malformed.
    #[error("stored {field} is not a JSON array of integers")]
    DecodeJson {
        /// Column being read.
        field: &'static str,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A stored integer is negative.
    #[error("stored {field} value {value} is negative")]
    NegativeValue {
        /// Column being read.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },
}

/// One persisted solve, as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Algorithm that produced the result.
    pub algorithm: Algorithm,
    /// The instance's set, in input order.
    pub set: Vec<u64>,
    /// The instance's target.
    pub target: u64,
    /// Density label, when the instance was generated.
    pub density: Option<Density>,
    /// Whether a solution was found.
    pub found: bool,
    /// The witness, empty when none was found.
    pub solution: Vec<u64>,
    /// Algorithm-specific operation count.
    pub operations: u64,
    /// Solve time, at microsecond resolution.
    pub elapsed: Duration,
}

/// [`ResultSink`] writing to a SQLite database.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use subset_sum_core::{Algorithm, Instance, ResultSink, SolveRecord, SolverResult};
/// use subset_sum_data::SqliteResultStore;
///
/// let mut store = SqliteResultStore::open_in_memory().unwrap();
/// let instance = Instance::new(vec![4, 5], 9).unwrap();
/// let result = SolverResult::solved(Algorithm::Backtracking, vec![4, 5], 1, Duration::ZERO);
/// store
///     .record(&SolveRecord { instance, density: None, result })
///     .unwrap();
/// assert_eq!(store.records().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct SqliteResultStore {
    connection: Connection,
}

const CREATE_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS solve_records (
    algorithm TEXT NOT NULL,
    set_json TEXT NOT NULL,
    target INTEGER NOT NULL,
    density TEXT,
    found INTEGER NOT NULL,
    solution_json TEXT NOT NULL,
    operations INTEGER NOT NULL,
    elapsed_micros INTEGER NOT NULL,
    PRIMARY KEY (algorithm, set_json, target)
)";

const INSERT_RECORD: &str = "INSERT OR REPLACE INTO solve_records
    (algorithm, set_json, target, density, found, solution_json, operations, elapsed_micros)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_RECORDS: &str = "SELECT algorithm, set_json, target, density, found, solution_json,
    operations, elapsed_micros FROM solve_records";

impl SqliteResultStore {
    /// Open or create the database at `path`, creating parent directories
    /// and the schema when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the directory, database or schema cannot
    /// be created.
    pub fn open(path: &Utf8Path) -> Result<Self, StoreError> {
        ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: Utf8PathBuf::from(":memory:"),
            source,
        })?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, StoreError> {
        connection
            .execute(CREATE_SCHEMA, [])
            .map_err(|source| StoreError::CreateSchema { source })?;
        Ok(Self { connection })
    }

    /// Every stored record, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails or a row is malformed.
    pub fn records(&self) -> Result<Vec<StoredRecord>, StoreError> {
        self.query(&format!("{SELECT_RECORDS} ORDER BY rowid"), ())
    }

    /// Records generated with `density`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails or a row is malformed.
    pub fn records_with_density(&self, density: Density) -> Result<Vec<StoredRecord>, StoreError> {
        self.query(
            &format!("{SELECT_RECORDS} WHERE density = ?1 ORDER BY rowid"),
            (density.as_str(),),
        )
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<StoredRecord>, StoreError> {
        let mut statement = self
            .connection
            .prepare(sql)
            .map_err(|source| StoreError::Query { source })?;
        let rows = statement
            .query_map(params, |row| {
                Ok(RawRow {
                    algorithm: row.get(0)?,
                    set_json: row.get(1)?,
                    target: row.get(2)?,
                    density: row.get(3)?,
                    found: row.get(4)?,
                    solution_json: row.get(5)?,
                    operations: row.get(6)?,
                    elapsed_micros: row.get(7)?,
                })
            })
            .map_err(|source| StoreError::Query { source })?;
        rows.map(|row| {
            row.map_err(|source| StoreError::Query { source })
                .and_then(RawRow::decode)
        })
        .collect()
    }
}

impl ResultSink for SqliteResultStore {
    type Error = StoreError;

    fn record(&mut self, record: &SolveRecord) -> Result<(), Self::Error> {
        let result = &record.result;
        let set_json =
            serde_json::to_string(record.instance.set()).map_err(|source| StoreError::EncodeJson {
                field: "set",
                source,
            })?;
        let solution_json =
            serde_json::to_string(&result.solution).map_err(|source| StoreError::EncodeJson {
                field: "solution",
                source,
            })?;
        let target = to_sql_integer("target", u128::from(record.instance.target()))?;
        let operations = to_sql_integer("operations", u128::from(result.operations))?;
        let elapsed_micros = to_sql_integer("elapsed_micros", result.elapsed.as_micros())?;
        self.connection
            .execute(
                INSERT_RECORD,
                (
                    result.algorithm.to_string(),
                    set_json,
                    target,
                    record.density.map(Density::as_str),
                    result.found,
                    solution_json,
                    operations,
                    elapsed_micros,
                ),
            )
            .map_err(|source| StoreError::Insert {
                algorithm: result.algorithm,
                source,
            })?;
        log::debug!(
            "recorded {} result for {} elements, target {}",
            result.algorithm,
            record.instance.len(),
            record.instance.target()
        );
        Ok(())
    }
}

fn to_sql_integer(field: &'static str, value: u128) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::ValueOutOfRange { field, value })
}

fn from_sql_integer(field: &'static str, value: i64) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::NegativeValue { field, value })
}

fn decode_values(field: &'static str, json: &str) -> Result<Vec<u64>, StoreError> {
    serde_json::from_str(json).map_err(|source| StoreError::DecodeJson { field, source })
}

/// A row exactly as SQLite returns it.
struct RawRow {
    algorithm: String,
    set_json: String,
    target: i64,
    density: Option<String>,
    found: bool,
    solution_json: String,
    operations: i64,
    elapsed_micros: i64,
}

impl RawRow {
    fn decode(self) -> Result<StoredRecord, StoreError> {
        let algorithm = self
            .algorithm
            .parse::<Algorithm>()
            .map_err(|source| StoreError::DecodeAlgorithm { source })?;
        let density = self
            .density
            .map(|label| label.parse::<Density>())
            .transpose()
            .map_err(|source| StoreError::DecodeDensity { source })?;
        Ok(StoredRecord {
            algorithm,
            set: decode_values("set", &self.set_json)?,
            target: from_sql_integer("target", self.target)?,
            density,
            found: self.found,
            solution: decode_values("solution", &self.solution_json)?,
            operations: from_sql_integer("operations", self.operations)?,
            elapsed: Duration::from_micros(from_sql_integer(
                "elapsed_micros",
                self.elapsed_micros,
            )?),
        })
    }
}

#[cfg(test)]
mod tests;
