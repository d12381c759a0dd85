//! Mock database clients for testing.
//!
//! Provide canned engine behavior so the check evaluator can be exercised on
//! failure paths the embedded engine never produces on demand.

use super::{DatabaseClient, QueryFailure, ResultSet};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock database client that returns predefined results per query text.
///
/// Queries without a registered response fail with an execution error.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    responses: HashMap<String, std::result::Result<ResultSet, QueryFailure>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with no registered queries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rows returned for `sql`.
    pub fn with_rows(mut self, sql: impl Into<String>, result: ResultSet) -> Self {
        self.responses.insert(sql.into(), Ok(result));
        self
    }

    /// Registers a failure returned for `sql`.
    pub fn with_failure(mut self, sql: impl Into<String>, failure: QueryFailure) -> Self {
        self.responses.insert(sql.into(), Err(failure));
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_batch(&self, _sql: &str) -> std::result::Result<(), String> {
        Ok(())
    }

    async fn fetch_rows(&self, sql: &str) -> std::result::Result<ResultSet, QueryFailure> {
        self.responses
            .get(sql)
            .cloned()
            .unwrap_or_else(|| Err(QueryFailure::Execute(format!("no mock response for: {sql}"))))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client on which every statement fails with the same engine message.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a client that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_batch(&self, _sql: &str) -> std::result::Result<(), String> {
        Err(self.message.clone())
    }

    async fn fetch_rows(&self, _sql: &str) -> std::result::Result<ResultSet, QueryFailure> {
        Err(QueryFailure::Execute(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client that counts how often it was closed.
///
/// Clones share the counter, so a test can keep one clone while a sandbox
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingDatabaseClient {
    batch_error: Option<String>,
    closes: Arc<AtomicUsize>,
}

impl RecordingDatabaseClient {
    /// Creates a client on which every batch succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every batch fail with `message`.
    pub fn with_batch_error(mut self, message: impl Into<String>) -> Self {
        self.batch_error = Some(message.into());
        self
    }

    /// Returns how many times `close` has been called.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseClient for RecordingDatabaseClient {
    async fn execute_batch(&self, _sql: &str) -> std::result::Result<(), String> {
        match &self.batch_error {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }

    async fn fetch_rows(&self, _sql: &str) -> std::result::Result<ResultSet, QueryFailure> {
        Ok(ResultSet::default())
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
