use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActorRole, SwipeDirection, SwipeTarget};

/// The profile attempting a swipe, reduced to what the verification gates read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SwipeActor {
    pub role: ActorRole,
    #[serde(default)]
    pub verification_level: i64,
    /// Whether the actor owns at least one verified listing (sellers only).
    #[serde(default)]
    pub has_verified_listing: bool,
}

/// Outcome of a swipe eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SwipeDecision {
    Allowed,
    Denied {
        reason: String,
        required_verification: i64,
    },
}

impl SwipeDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// A recorded swipe. One row per `(actor_id, target_type, target_id)`; a
/// repeat swipe replaces the direction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Swipe {
    pub id: String,
    pub actor_id: String,
    pub target_type: SwipeTarget,
    pub target_id: String,
    /// Profile owning the target: the listing's seller or the intent's buyer.
    pub target_owner_id: String,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A buyer and seller who both swiped "yes" on each other.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MutualMatch {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub buyer_intent_id: String,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
}
