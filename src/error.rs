//! Error types for the grader.
//!
//! Defines the main error enum for fatal conditions. Failures local to a single
//! check are not errors; they are reported as failed check results.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for grading operations.
#[derive(Error, Debug)]
pub enum GraderError {
    /// The requested exercise directory or its definition file does not exist.
    #[error("Exercise not found: {0}")]
    NotFound(String),

    /// A definition or config file exists but could not be decoded.
    #[error("Invalid exercise config: {0}")]
    Parse(String),

    /// The learner's solution file is missing.
    #[error("Solution file not found: {}", .0.display())]
    SolutionNotFound(PathBuf),

    /// Filesystem errors while reading the catalog or a solution.
    #[error("I/O error: {0}")]
    Io(String),

    /// The sandbox database could not be provisioned.
    #[error("Database error: {0}")]
    Database(String),

    /// The exercise setup script could not be read or executed.
    #[error("Setup error: {0}")]
    Environment(String),

    /// The learner's solution failed to execute.
    #[error("Error in your SQL: {0}")]
    Learner(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GraderError {
    /// Creates a not-found error for the given exercise id.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates a database provisioning error with the given message.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Creates a setup (environment) error with the given message.
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    /// Creates a learner error carrying the engine diagnostic.
    pub fn learner(msg: impl Into<String>) -> Self {
        Self::Learner(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Parse(_) => "Configuration Error",
            Self::SolutionNotFound(_) | Self::Io(_) => "File Error",
            Self::Database(_) | Self::Environment(_) => "Environment Error",
            Self::Learner(_) => "Solution Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if the error was caused by the learner's own SQL.
    pub fn is_learner_error(&self) -> bool {
        matches!(self, Self::Learner(_))
    }
}

/// Result type alias using GraderError.
pub type Result<T> = std::result::Result<T, GraderError>;
