//! Isolated execution of setup and solution SQL.

use crate::db::{DatabaseClient, SqliteClient};
use crate::error::{GraderError, Result};
use crate::exercise::Exercise;
use tracing::debug;

/// A database scoped to a single grading run.
pub struct Sandbox {
    client: Box<dyn DatabaseClient>,
}

impl Sandbox {
    /// Provisions a fresh in-memory database.
    pub async fn provision() -> Result<Self> {
        let client = SqliteClient::open_in_memory().await?;
        Ok(Self::with_client(Box::new(client)))
    }

    /// Wraps an already-open client.
    pub fn with_client(client: Box<dyn DatabaseClient>) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &dyn DatabaseClient {
        self.client.as_ref()
    }

    /// Runs the exercise's setup script, if it declares one.
    ///
    /// Any failure here is an environment error, never the learner's.
    pub async fn apply_setup(&self, exercise: &Exercise) -> Result<()> {
        let Some(path) = exercise.setup_path() else {
            return Ok(());
        };

        let sql = tokio::fs::read_to_string(&path).await.map_err(|e| {
            GraderError::environment(format!(
                "Failed to read setup SQL {}: {e}",
                path.display()
            ))
        })?;

        self.client.execute_batch(&sql).await.map_err(|msg| {
            GraderError::environment(format!(
                "Failed to run setup SQL {}: {msg}",
                path.display()
            ))
        })?;

        debug!("Applied setup script {}", path.display());
        Ok(())
    }

    /// Runs the learner's solution. The engine message is kept verbatim.
    pub async fn apply_solution(&self, solution: &str) -> Result<()> {
        self.client
            .execute_batch(solution)
            .await
            .map_err(GraderError::learner)?;

        debug!("Applied learner solution");
        Ok(())
    }

    /// Closes the database.
    pub async fn close(self) -> Result<()> {
        self.client.close().await
    }
}
