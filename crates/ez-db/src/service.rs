//! Service layer over the database handle.
//!
//! `EzService` wraps `EzDb`. All repo methods are implemented as
//! `impl EzService` blocks in `repos/` (templates, tasks, swipes, listing
//! posts), and the task generator in `generator.rs`.

use ez_config::DatabaseConfig;
use tracing::info;

use crate::EzDb;
use crate::error::DatabaseError;

pub struct EzService {
    db: EzDb,
}

impl EzService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: EzDb::open_local(db_path).await?,
        })
    }

    /// Create a service over a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the remote cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: EzDb::open_remote(url, auth_token).await?,
        })
    }

    /// Remote when `[database]` has both a URL and a token, local file otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the selected database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_configured() {
            info!(url = %config.url, "opening remote database");
            Self::new_remote(&config.url, &config.auth_token).await
        } else {
            info!(path = %config.path, "opening local database");
            Self::new_local(&config.path).await
        }
    }

    #[must_use]
    pub const fn from_db(db: EzDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &EzDb {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_config_defaults_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("ezriya.db").to_string_lossy().into_owned(),
            ..Default::default()
        };
        let svc = EzService::from_config(&config).await.unwrap();
        assert!(!svc.db().is_remote());
        assert!(dir.path().join("ezriya.db").exists());
    }
}
