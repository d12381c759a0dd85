//! Rendering of grading results for the console.
//!
//! Rendering is pure; callers decide where the text goes.

use crate::error::{GraderError, Result};
use crate::exercise::Exercise;
use crate::grader::GradeResult;
use std::fmt::Write;

/// Output format for grading reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// The grade result as pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Renders a grade result in the requested format.
pub fn render(exercise: &Exercise, result: &GradeResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(exercise, result)),
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| GraderError::internal(format!("Failed to serialize result: {e}"))),
    }
}

/// Renders the per-check report with expected and actual rows on mismatch.
pub fn render_text(exercise: &Exercise, result: &GradeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Grading: {} ===\n", exercise.name);

    for check in &result.checks {
        if check.passed {
            let _ = writeln!(out, "✅ {}", check.check_name);
            continue;
        }
        let _ = writeln!(out, "❌ {}", check.check_name);
        let _ = writeln!(out, "   {}", check.message);
        if let (Some(expected), Some(actual)) = (&check.expected, &check.actual) {
            let _ = writeln!(out, "   Expected: {expected}");
            let _ = writeln!(out, "   Got:      {actual}");
        }
    }

    out.push('\n');
    if result.passed {
        out.push_str("🎉 All checks passed! Great job!\n");
    } else {
        out.push_str(
            "Keep trying! Review the exercise requirements and update your solution.\n",
        );
    }
    out
}

/// Renders the catalog listing.
pub fn render_list(exercises: &[Exercise]) -> String {
    let mut out = String::from("Available exercises:\n\n");
    for exercise in exercises {
        let _ = writeln!(out, "  [{}] {}", exercise.id, exercise.name);
        let _ = writeln!(out, "      {}\n", exercise.description);
    }
    out
}
