use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lead score for one (need, listing) pair. Computed fresh on every call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MatchResult {
    /// 0..=100.
    pub score: u8,
    pub explanation: String,
}

/// One entry of a matchmake ranking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RankedMatch {
    pub listing_id: String,
    /// Normalised to `[0.0, 1.0]`.
    pub match_score: f64,
    pub commute_estimate_minutes: Option<u32>,
    pub reasons: Vec<String>,
}
