//! libSQL database configuration.
//!
//! A local file is the default. Setting both `url` and `auth_token` switches
//! the server to a remote libSQL database instead.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "ezriya.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file. `:memory:` gives a throwaway database.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://ezriya.turso.io`).
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the remote database has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
