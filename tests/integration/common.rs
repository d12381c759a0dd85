//! Shared fixtures: a temporary workspace with `exercises/` and `solutions/`.

use sql_grader::config::GraderConfig;
use sql_grader::grader::Grader;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// A temporary course layout.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("exercises")).unwrap();
        fs::create_dir_all(dir.path().join("solutions")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `exercises/<id>/config.json`.
    pub fn add_exercise(&self, id: &str, definition: serde_json::Value) {
        let dir = self.root().join("exercises").join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.json"), definition.to_string()).unwrap();
    }

    /// Writes a file next to an exercise definition.
    pub fn add_exercise_file(&self, id: &str, name: &str, content: &str) {
        fs::write(self.root().join("exercises").join(id).join(name), content).unwrap();
    }

    /// Writes `solutions/<id>.sql`.
    pub fn add_solution(&self, id: &str, sql: &str) {
        fs::write(self.root().join("solutions").join(format!("{id}.sql")), sql).unwrap();
    }

    pub fn config(&self) -> GraderConfig {
        GraderConfig {
            exercises_dir: self.root().join("exercises"),
            solutions_dir: self.root().join("solutions"),
        }
    }

    pub fn grader(&self) -> Grader {
        Grader::new(self.config())
    }
}
