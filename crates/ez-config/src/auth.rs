//! Service key configuration for the database-backed endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Keys accepted as `Authorization: Bearer <key>` or `apikey: <key>`.
    /// Empty leaves every endpoint open.
    #[serde(default)]
    pub service_keys: Vec<String>,
}

impl AuthConfig {
    pub fn is_enforced(&self) -> bool {
        self.service_keys.iter().any(|k| !k.is_empty())
    }

    /// Whether `key` matches a configured service key. Blank keys never match.
    pub fn accepts(&self, key: &str) -> bool {
        !key.is_empty() && self.service_keys.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_by_default() {
        let config = AuthConfig::default();
        assert!(!config.is_enforced());
        assert!(!config.accepts("anything"));
    }

    #[test]
    fn accepts_only_listed_keys() {
        let config = AuthConfig {
            service_keys: vec!["svc-1".into(), String::new()],
        };
        assert!(config.is_enforced());
        assert!(config.accepts("svc-1"));
        assert!(!config.accepts("svc-2"));
        assert!(!config.accepts(""));
    }
}
