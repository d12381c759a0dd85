//! SQLite sandbox client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient` trait
//! over a private in-memory SQLite database using sqlx.

use crate::db::{
    DatabaseClient, QueryFailure, ResultSet, Row, Value, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT,
};
use crate::error::{GraderError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as SqlxRow, TypeInfo, ValueRef};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Every parse of this URL yields a distinct private in-memory database.
const IN_MEMORY_URL: &str = "sqlite::memory:";

/// SQLite client backed by a single-connection in-memory pool.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Opens a fresh in-memory database that shares no state with any other.
    ///
    /// The pool is pinned to one connection that is never reaped, because the
    /// database disappears with its last connection.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str(IN_MEMORY_URL)
            .map_err(|e| GraderError::database(format!("Invalid database options: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                GraderError::database(format!("Failed to open in-memory database: {e}"))
            })?;

        debug!("Opened in-memory sandbox database");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_batch(&self, sql: &str) -> std::result::Result<(), String> {
        let done = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| engine_message(&e))?;

        debug!("Batch affected {} rows", done.rows_affected());
        Ok(())
    }

    async fn fetch_rows(&self, sql: &str) -> std::result::Result<ResultSet, QueryFailure> {
        let mut stream = sqlx::query(sql).fetch(&self.pool);
        let mut columns: Option<Vec<String>> = None;
        let mut rows: Vec<Row> = Vec::new();

        // Engine errors can surface at any row, not just the first
        while let Some(row) = stream
            .try_next()
            .await
            .map_err(|e| QueryFailure::Execute(engine_message(&e)))?
        {
            // Rows from a second statement would otherwise be filed under the first's columns
            let names = column_names(&row)?;
            let first = columns.get_or_insert_with(|| names.clone());
            if *first != names {
                return Err(QueryFailure::Columns(format!(
                    "result columns changed from {first:?} to {names:?}; \
                     a check must be a single query"
                )));
            }
            rows.push(convert_row(&row).map_err(|e| QueryFailure::Scan(engine_message(&e)))?);
        }

        debug!("Query returned {} rows", rows.len());
        Ok(ResultSet::new(columns.unwrap_or_default(), rows))
    }

    async fn enter_read_only(&self) -> Result<()> {
        sqlx::query("PRAGMA query_only = ON")
            .execute(&self.pool)
            .await
            .map_err(|e| GraderError::database(format!("Failed to enable read-only mode: {e}")))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        debug!("Closed sandbox database");
        Ok(())
    }
}

/// Reads the result schema from a row.
fn column_names(row: &SqliteRow) -> std::result::Result<Vec<String>, QueryFailure> {
    (0..row.len())
        .map(|i| {
            row.try_column(i)
                .map(|col| col.name().to_string())
                .map_err(|e| QueryFailure::Columns(engine_message(&e)))
        })
        .collect()
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> std::result::Result<Row, sqlx::Error> {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite stores everything as NULL, INTEGER, REAL, TEXT or BLOB, and the
/// storage class decides the value. The declared column type only refines a
/// value when nothing is lost: a BOOLEAN column maps the integers 0 and 1, and
/// DATE, TIME or DATETIME columns (TIMESTAMP reports as DATETIME) map text that
/// is already in that type's canonical form.
fn convert_value(row: &SqliteRow, index: usize) -> std::result::Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let storage = raw.type_info().name().to_uppercase();
    let declared = row.try_column(index)?.type_info().name().to_uppercase();

    let value = match storage.as_str() {
        "INTEGER" => match (declared.as_str(), row.try_get_unchecked::<i64, _>(index)?) {
            ("BOOLEAN", flag @ (0 | 1)) => Value::Bool(flag == 1),
            (_, int) => Value::Int(int),
        },
        "REAL" => Value::Float(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => Value::Bytes(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => refine_text(&declared, row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

/// Reads text from a temporal column as a date or time only when formatting
/// it back reproduces the stored text exactly.
fn refine_text(declared: &str, text: String) -> Value {
    let refined = match declared {
        "DATE" => NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .ok()
            .filter(|d| d.format(DATE_FORMAT).to_string() == text)
            .map(Value::Date),
        "TIME" => NaiveTime::parse_from_str(&text, TIME_FORMAT)
            .ok()
            .filter(|t| t.format(TIME_FORMAT).to_string() == text)
            .map(Value::Time),
        "DATETIME" => NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .ok()
            .filter(|dt| dt.format(DATETIME_FORMAT).to_string() == text)
            .map(Value::DateTime),
        _ => None,
    };
    refined.unwrap_or(Value::Text(text))
}

/// Extracts the engine's own diagnostic from a sqlx error.
fn engine_message(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
