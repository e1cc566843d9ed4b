//! General application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Workflow template file (TOML) seeded into the database on `serve`.
    #[serde(default)]
    pub templates_path: String,
}

impl GeneralConfig {
    pub fn templates_path(&self) -> Option<&Path> {
        (!self.templates_path.is_empty()).then(|| Path::new(&self.templates_path))
    }
}
