//! Grading outcomes.

use serde::Serialize;

/// Outcome of evaluating one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Name of the evaluated check.
    pub check_name: String,

    /// Whether the actual rows matched the expected rows.
    pub passed: bool,

    /// Failure reason, or a success notice.
    pub message: String,

    /// Canonical expected rows; only set on a row mismatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Canonical actual rows; only set on a row mismatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl CheckResult {
    /// Creates a passing result.
    pub fn pass(check_name: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            passed: true,
            message: "Passed!".to_string(),
            expected: None,
            actual: None,
        }
    }

    /// Creates a failing result without payloads.
    pub fn fail(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            passed: false,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Creates a failing result for a row mismatch, carrying both encodings.
    pub fn mismatch(
        check_name: impl Into<String>,
        message: impl Into<String>,
        expected: String,
        actual: String,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            passed: false,
            message: message.into(),
            expected: Some(expected),
            actual: Some(actual),
        }
    }
}

/// Outcome of grading one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeResult {
    /// Identifier of the graded exercise.
    pub exercise_id: String,

    /// True iff every check passed; true when there are no checks.
    pub passed: bool,

    /// Per-check results in declaration order.
    pub checks: Vec<CheckResult>,
}

impl GradeResult {
    /// Aggregates check results; the overall verdict is their conjunction.
    pub fn from_checks(exercise_id: impl Into<String>, checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().all(|c| c.passed);
        Self {
            exercise_id: exercise_id.into(),
            passed,
            checks,
        }
    }

    /// Number of checks that failed.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}
