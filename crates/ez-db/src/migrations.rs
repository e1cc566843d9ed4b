//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::EzDb;
use crate::error::DatabaseError;

/// Initial schema: `workflow_templates` and `tasks` with their indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Swipes, mutual matches, and listing post verification.
const MIGRATION_002: &str = include_str!("../migrations/002_swipes_and_listings.sql");

impl EzDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_swipes_and_listings: {e}")))?;
        Ok(())
    }
}
