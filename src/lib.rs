//! sql-grader - grades SQL exercise solutions against instructor-defined checks.
//!
//! This library exposes the core modules for use by the binary and integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod exercise;
pub mod grader;
pub mod logging;
pub mod report;
