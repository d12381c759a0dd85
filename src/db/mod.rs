//! Database abstraction layer for the grader.
//!
//! Provides a trait-based interface over the SQL engine that hosts a grading
//! run, so the check evaluator does not depend on a concrete backend.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, RecordingDatabaseClient};
pub use sqlite::SqliteClient;
pub use types::{ResultSet, Row, Value, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};

use async_trait::async_trait;
use thiserror::Error;

use crate::error::Result;

/// Stage at which a read query failed.
///
/// Each variant carries the engine diagnostic verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    /// The engine rejected or failed to run the statement.
    #[error("Query error: {0}")]
    Execute(String),

    /// The result schema could not be read.
    #[error("Error getting columns: {0}")]
    Columns(String),

    /// A value in a returned row could not be decoded.
    #[error("Scan error: {0}")]
    Scan(String),
}

/// Trait defining the interface for sandbox database clients.
///
/// A client owns one isolated database for the lifetime of a grading run.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a batch of SQL statements, discarding any rows they produce.
    ///
    /// The error string is the engine's diagnostic, unmodified.
    async fn execute_batch(&self, sql: &str) -> std::result::Result<(), String>;

    /// Runs a read query and returns every row in engine order.
    async fn fetch_rows(&self, sql: &str) -> std::result::Result<ResultSet, QueryFailure>;

    /// Rejects writes from this point on, so checks can only observe state.
    async fn enter_read_only(&self) -> Result<()> {
        Ok(())
    }

    /// Closes the database, dropping all of its state.
    async fn close(&self) -> Result<()>;
}
