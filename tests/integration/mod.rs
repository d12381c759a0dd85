//! Integration tests for sql-grader.

pub mod catalog_test;
pub mod common;
pub mod grading_test;
