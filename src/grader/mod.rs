//! Grading pipeline.
//!
//! Loads an exercise, applies setup and solution SQL in a fresh sandbox, runs
//! every check in order and aggregates the verdicts.

mod canonical;
mod check;
mod result;
mod sandbox;

pub use canonical::{canonicalize, encode_expected, encode_rows};
pub use check::run_check;
pub use result::{CheckResult, GradeResult};
pub use sandbox::Sandbox;

use crate::config::GraderConfig;
use crate::error::{GraderError, Result};
use crate::exercise::{Catalog, Exercise};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Grades learner solutions against a catalog of exercises.
#[derive(Debug, Clone)]
pub struct Grader {
    catalog: Catalog,
    config: GraderConfig,
}

impl Grader {
    /// Creates a grader for the given configuration.
    pub fn new(config: GraderConfig) -> Self {
        Self {
            catalog: Catalog::new(&config.exercises_dir),
            config,
        }
    }

    /// Returns the exercise catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Grades the learner's solution file for `exercise_id`.
    ///
    /// The exercise and solution are both read before any database is opened.
    pub async fn grade(&self, exercise_id: &str) -> Result<(Exercise, GradeResult)> {
        let exercise = self.catalog.load_exercise(exercise_id)?;
        let solution = read_solution(&self.config.solution_path(exercise_id))?;

        let sandbox = Sandbox::provision().await?;
        let result = grade_and_close(sandbox, &exercise, &solution).await?;
        Ok((exercise, result))
    }
}

/// Grades inside `sandbox`, then closes it whether or not grading succeeded.
///
/// A grading error takes precedence over a close error.
pub async fn grade_and_close(
    sandbox: Sandbox,
    exercise: &Exercise,
    solution: &str,
) -> Result<GradeResult> {
    let result = grade_in_sandbox(&sandbox, exercise, solution).await;
    let closed = sandbox.close().await;

    let result = result?;
    closed?;
    Ok(result)
}

/// Runs setup, solution and checks inside an already-provisioned sandbox.
///
/// Setup and solution failures abort before any check runs. Check failures are
/// recorded per check and never stop the remaining checks.
pub async fn grade_in_sandbox(
    sandbox: &Sandbox,
    exercise: &Exercise,
    solution: &str,
) -> Result<GradeResult> {
    sandbox.apply_setup(exercise).await?;
    sandbox.apply_solution(solution).await?;
    sandbox.client().enter_read_only().await?;

    let mut checks = Vec::with_capacity(exercise.checks.len());
    for check in &exercise.checks {
        let result = run_check(sandbox.client(), check).await;
        debug!("Check '{}' passed: {}", result.check_name, result.passed);
        checks.push(result);
    }

    let result = GradeResult::from_checks(&exercise.id, checks);
    info!(
        "Graded '{}': {} of {} checks passed",
        exercise.id,
        result.checks.len() - result.failed_count(),
        result.checks.len()
    );
    Ok(result)
}

/// Reads a learner solution file.
fn read_solution(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GraderError::SolutionNotFound(path.to_path_buf()),
        _ => GraderError::io(format!("Error reading solution {}: {e}", path.display())),
    })
}
