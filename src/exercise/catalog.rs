//! Exercise catalog loading.
//!
//! The catalog root holds one directory per exercise. Each is re-read from
//! disk on every call; nothing is cached between calls.

use super::Exercise;
use crate::error::{GraderError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Name of the definition file inside each exercise directory.
pub const DEFINITION_FILE: &str = "config.json";

/// A directory of exercise definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    /// Creates a catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the catalog root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads a single exercise by identifier.
    ///
    /// Fails with `NotFound` when the directory or definition file is absent and
    /// with `Parse` when the definition cannot be decoded.
    pub fn load_exercise(&self, id: &str) -> Result<Exercise> {
        if !is_plain_name(id) {
            return Err(GraderError::not_found(id));
        }
        load_definition(&self.root.join(id), id)
    }

    /// Lazily yields every catalog entry in directory-name order.
    ///
    /// Hidden (dot-prefixed) entries and plain files are not exercises and are
    /// skipped. A missing root yields nothing.
    pub fn entries(&self) -> Result<impl Iterator<Item = Result<Exercise>>> {
        let read_dir = match fs::read_dir(&self.root) {
            Ok(read_dir) => Some(read_dir),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Catalog root {} does not exist", self.root.display());
                None
            }
            Err(e) => {
                return Err(GraderError::io(format!(
                    "Failed to read exercise directory {}: {e}",
                    self.root.display()
                )))
            }
        };

        let mut dirs: Vec<(String, PathBuf)> = read_dir
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                (!name.starts_with('.')).then(|| (name, entry.path()))
            })
            .collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(dirs.into_iter().map(load_entry))
    }

    /// Loads every exercise that parses, skipping the ones that do not.
    ///
    /// A broken definition never hides the others.
    pub fn load_exercises(&self) -> Result<Vec<Exercise>> {
        let exercises = self
            .entries()?
            .filter_map(|entry| match entry {
                Ok(exercise) => Some(exercise),
                Err(e) => {
                    warn!("Skipping exercise: {e}");
                    None
                }
            })
            .collect();
        Ok(exercises)
    }
}

fn load_entry((name, dir): (String, PathBuf)) -> Result<Exercise> {
    load_definition(&dir, &name)
}

/// Reads and decodes `<dir>/config.json`, checking its id against `dir_name`.
fn load_definition(dir: &Path, dir_name: &str) -> Result<Exercise> {
    let path = dir.join(DEFINITION_FILE);
    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GraderError::not_found(dir_name),
        _ => GraderError::io(format!("Failed to read {}: {e}", path.display())),
    })?;

    let mut exercise: Exercise = serde_json::from_str(&content)
        .map_err(|e| GraderError::parse(format!("{}: {e}", path.display())))?;

    if exercise.id != dir_name {
        return Err(GraderError::parse(format!(
            "{}: id '{}' does not match directory '{}'",
            path.display(),
            exercise.id,
            dir_name
        )));
    }

    for name in exercise.duplicate_check_names() {
        warn!("Exercise '{}' declares check '{}' more than once", exercise.id, name);
    }

    exercise.dir = dir.to_path_buf();
    debug!(
        "Loaded exercise '{}' with {} checks",
        exercise.id,
        exercise.checks.len()
    );
    Ok(exercise)
}

/// Returns true if `id` names a single directory entry (no separators, no `..`).
fn is_plain_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.starts_with('.')
}
