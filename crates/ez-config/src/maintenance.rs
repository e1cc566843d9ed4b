//! Scheduled maintenance settings.

use serde::{Deserialize, Serialize};

const fn default_stale_listing_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Verified listings not re-verified within this many days are unverified
    /// by `maintenance-unverify-stale`.
    #[serde(default = "default_stale_listing_days")]
    pub stale_listing_days: u32,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            stale_listing_days: default_stale_listing_days(),
        }
    }
}
