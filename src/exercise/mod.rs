//! Exercise definitions.
//!
//! An exercise is read from `<catalog>/<id>/config.json` and never changes
//! after loading.

mod catalog;

pub use catalog::{Catalog, DEFINITION_FILE};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A graded exercise: optional setup state plus an ordered list of checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Identifier; equals the name of the directory holding the definition.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Free-text description shown in listings.
    #[serde(default)]
    pub description: String,

    /// Setup script file name, relative to the exercise directory. Empty means none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub setup_sql: String,

    /// Reference solution path. Informational only; never executed.
    #[serde(default)]
    pub solution_sql: String,

    /// Validation checks, in declaration order.
    #[serde(default)]
    pub checks: Vec<Check>,

    /// Directory the definition was loaded from.
    #[serde(skip)]
    pub dir: PathBuf,
}

impl Exercise {
    /// Returns the resolved setup script path, if the exercise declares one.
    pub fn setup_path(&self) -> Option<PathBuf> {
        let name = self.setup_sql.trim();
        if name.is_empty() {
            None
        } else {
            Some(self.dir.join(name))
        }
    }

    /// Returns check names that appear more than once, in first-repeat order.
    pub fn duplicate_check_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for check in &self.checks {
            if !seen.insert(check.name.as_str()) && !duplicates.contains(&check.name.as_str()) {
                duplicates.push(check.name.as_str());
            }
        }
        duplicates
    }
}

/// A single validation query and its expected rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Check {
    /// Display key for the check.
    #[serde(default)]
    pub name: String,

    /// Read query run against the sandbox after the solution is applied.
    #[serde(default)]
    pub query: String,

    /// JSON text holding an array of row objects.
    #[serde(default)]
    pub expected: String,

    /// Shown to the learner when the rows do not match.
    #[serde(default)]
    pub description: String,
}
