//! Configuration management for the grader.
//!
//! Handles loading the optional TOML config file and applying command-line
//! and environment overrides to the catalog and solutions locations.

use crate::error::{GraderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Directory holding one subdirectory per exercise.
    #[serde(default = "default_exercises_dir")]
    pub exercises_dir: PathBuf,

    /// Directory holding learner solutions as `<exercise_id>.sql`.
    #[serde(default = "default_solutions_dir")]
    pub solutions_dir: PathBuf,
}

fn default_exercises_dir() -> PathBuf {
    PathBuf::from("exercises")
}

fn default_solutions_dir() -> PathBuf {
    PathBuf::from("solutions")
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            exercises_dir: default_exercises_dir(),
            solutions_dir: default_solutions_dir(),
        }
    }
}

/// Overrides taken from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub exercises_dir: Option<PathBuf>,
    pub solutions_dir: Option<PathBuf>,
}

impl GraderConfig {
    /// Returns the default config file path, relative to the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("grader.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GraderError::io(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            GraderError::parse(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies overrides, which take precedence over file values.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.exercises_dir {
            self.exercises_dir = dir.clone();
        }
        if let Some(dir) = &overrides.solutions_dir {
            self.solutions_dir = dir.clone();
        }
    }

    /// Returns the path of the learner's solution for an exercise.
    pub fn solution_path(&self, exercise_id: &str) -> PathBuf {
        self.solutions_dir.join(format!("{exercise_id}.sql"))
    }
}
