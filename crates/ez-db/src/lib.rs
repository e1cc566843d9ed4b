//! # ez-db
//!
//! libSQL storage for Ezriya: workflow templates, tasks, and the task
//! generator that expands one into the other; swipes with mutual-match
//! detection; listing post verification.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29). A local file is the
//! default; a remote libSQL database is used when `[database]` carries a URL
//! and auth token.

pub mod error;
pub mod generator;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod test_support;

use error::DatabaseError;
use ez_core::ids::format_id;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. All access is serial
/// through that connection.
pub struct EzDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl EzDb {
    /// Open a local database at the given path (`:memory:` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::init(db, false).await
    }

    /// Open a remote libSQL database over the network.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::init(db, true).await
    }

    async fn init(db: libsql::Database, remote: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ez_db = Self { db, conn, remote };
        ez_db.run_migrations().await?;
        Ok(ez_db)
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1d4e5f607"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(8)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(format_id(prefix, &row.get::<String>(0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> EzDb {
        EzDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        assert!(!db.is_remote());

        for table in ["workflow_templates", "tasks", "swipes", "matches", "listing_posts"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id(ez_core::ids::PREFIX_TASK).await.unwrap();
        assert!(id.starts_with("tsk-"), "ID should start with 'tsk-': {id}");
        assert_eq!(id.len(), 20, "3 prefix + 1 dash + 16 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(ez_core::ids::prefix_of(&id), Some("tsk"));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn task_must_carry_exactly_one_context() {
        let db = test_db().await;

        let both = db
            .conn()
            .execute(
                "INSERT INTO tasks (id, context_type, deal_id, listing_post_id, assigned_role, title)
                 VALUES ('tsk-t1', 'deal', 'deal-1', 'lst-1', 'buyer', 'Both ids')",
                (),
            )
            .await;
        assert!(both.is_err(), "deal task with a listing id should be rejected");

        let mismatched = db
            .conn()
            .execute(
                "INSERT INTO tasks (id, context_type, deal_id, assigned_role, title)
                 VALUES ('tsk-t2', 'listing', 'deal-1', 'buyer', 'Wrong type')",
                (),
            )
            .await;
        assert!(mismatched.is_err());
    }

    #[tokio::test]
    async fn template_key_is_unique() {
        let db = test_db().await;
        let insert = "INSERT INTO workflow_templates (id, template_key, stage, assigned_role, title)
                      VALUES (?1, 'deal.closing.walkthrough', 'closing', 'buyer', 'Walkthrough')";

        db.conn().execute(insert, ["wft-1"]).await.unwrap();
        assert!(db.conn().execute(insert, ["wft-2"]).await.is_err());
    }
}
