//! Query result types for the grader.
//!
//! Defines the structures used to represent rows returned by the sandbox engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Text form of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text form of a time of day, with fractional seconds when present.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Text form of a date and time without a zone.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Rows produced by a check query, in the order the engine returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column names as reported by the query's result schema.
    pub columns: Vec<String>,

    /// Rows of data; each row has one value per column.
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a result set with the given columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Pairs every value with its column name, one entry per row.
    ///
    /// When a query reports the same column name twice, the later value wins.
    pub fn named_rows(&self) -> impl Iterator<Item = Vec<(&str, &Value)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single scalar value returned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// Calendar date.
    Date(NaiveDate),

    /// Time of day.
    Time(NaiveTime),

    /// Date and time without a zone.
    DateTime(NaiveDateTime),
}
