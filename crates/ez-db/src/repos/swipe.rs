//! Swipe repository and mutual-match detection.
//!
//! A match forms when both sides said "yes": a buyer liked a seller's listing
//! and that seller accepted one of the buyer's intents. Whichever swipe comes
//! second creates the match, and the match's deal gets its `matched` stage
//! tasks generated from templates.

use chrono::Utc;
use tracing::{debug, info, warn};

use ez_core::entities::{MutualMatch, Swipe, TaskContext};
use ez_core::enums::{SwipeDirection, SwipeTarget};
use ez_core::ids::{PREFIX_MATCH, PREFIX_SWIPE};
use ez_core::responses::SwipeOutcome;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::EzService;

const SWIPE_COLS: &str = "id, actor_id, target_type, target_id, target_owner_id, direction, \
                          created_at, updated_at";

const MATCH_COLS: &str = "id, listing_id, buyer_id, seller_id, buyer_intent_id, match_score, \
                          created_at";

/// Score recorded for a match formed by mutual swipes.
pub const MUTUAL_MATCH_SCORE: f64 = 0.85;

/// Workflow stage generated for the deal of a new match.
pub const MATCHED_STAGE: &str = "matched";

fn row_to_swipe(row: &libsql::Row) -> Result<Swipe, DatabaseError> {
    Ok(Swipe {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        target_type: parse_enum(&row.get::<String>(2)?)?,
        target_id: row.get(3)?,
        target_owner_id: row.get(4)?,
        direction: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn row_to_match(row: &libsql::Row) -> Result<MutualMatch, DatabaseError> {
    Ok(MutualMatch {
        id: row.get(0)?,
        listing_id: row.get(1)?,
        buyer_id: row.get(2)?,
        seller_id: row.get(3)?,
        buyer_intent_id: row.get(4)?,
        match_score: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Fields supplied by the caller when swiping.
#[derive(Debug, Clone)]
pub struct NewSwipe {
    pub actor_id: String,
    pub target_type: SwipeTarget,
    pub target_id: String,
    pub target_owner_id: String,
    pub direction: SwipeDirection,
}

/// The two sides of a would-be match.
struct MatchPair {
    listing_id: String,
    buyer_id: String,
    seller_id: String,
    buyer_intent_id: String,
}

impl EzService {
    /// Store a swipe and, on a "yes" answering an earlier "yes", create the
    /// match and generate its deal tasks.
    ///
    /// Verification gates are not applied here; callers check them first.
    pub async fn record_swipe(&self, new: &NewSwipe) -> Result<SwipeOutcome, DatabaseError> {
        let swipe = self.upsert_swipe(new).await?;
        let mutual_match = match swipe.direction {
            SwipeDirection::Yes => self.detect_mutual_match(&swipe).await?,
            SwipeDirection::No => None,
        };

        let tasks = match &mutual_match {
            Some(m) => {
                let context = TaskContext::Deal(m.id.clone());
                match self.generate_tasks(&context, MATCHED_STAGE).await {
                    Ok(report) => report.tasks,
                    Err(e) => {
                        warn!(match_id = %m.id, error = %e, "match created but task generation failed");
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        Ok(SwipeOutcome {
            swipe,
            match_created: mutual_match.is_some(),
            mutual_match,
            tasks,
        })
    }

    async fn upsert_swipe(&self, new: &NewSwipe) -> Result<Swipe, DatabaseError> {
        let id = self.db().generate_id(PREFIX_SWIPE).await?;
        let now = Utc::now().to_rfc3339();
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO swipes ({SWIPE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                     ON CONFLICT(actor_id, target_type, target_id) DO UPDATE SET
                       target_owner_id = ?5, direction = ?6, updated_at = ?7"
                ),
                libsql::params![
                    id.as_str(),
                    new.actor_id.as_str(),
                    new.target_type.as_str(),
                    new.target_id.as_str(),
                    new.target_owner_id.as_str(),
                    new.direction.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        self.get_swipe(&new.actor_id, new.target_type, &new.target_id)
            .await
    }

    pub async fn get_swipe(
        &self,
        actor_id: &str,
        target_type: SwipeTarget,
        target_id: &str,
    ) -> Result<Swipe, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SWIPE_COLS} FROM swipes
                     WHERE actor_id = ?1 AND target_type = ?2 AND target_id = ?3"
                ),
                [actor_id, target_type.as_str(), target_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_swipe(&row)
    }

    /// The match between a listing and a buyer, if one exists.
    pub async fn find_match(
        &self,
        listing_id: &str,
        buyer_id: &str,
    ) -> Result<Option<MutualMatch>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {MATCH_COLS} FROM matches WHERE listing_id = ?1 AND buyer_id = ?2"
                ),
                [listing_id, buyer_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_match(&row)?)),
            None => Ok(None),
        }
    }

    /// Look for the target owner's "yes" on something the actor owns. The most
    /// recent one pairs with this swipe.
    async fn detect_mutual_match(
        &self,
        swipe: &Swipe,
    ) -> Result<Option<MutualMatch>, DatabaseError> {
        let reciprocal_type = match swipe.target_type {
            SwipeTarget::Listing => SwipeTarget::BuyerIntent,
            SwipeTarget::BuyerIntent => SwipeTarget::Listing,
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT target_id FROM swipes
                 WHERE actor_id = ?1 AND target_type = ?2 AND target_owner_id = ?3
                   AND direction = ?4
                 ORDER BY updated_at DESC, rowid DESC
                 LIMIT 1",
                [
                    swipe.target_owner_id.as_str(),
                    reciprocal_type.as_str(),
                    swipe.actor_id.as_str(),
                    SwipeDirection::Yes.as_str(),
                ],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            debug!(actor = %swipe.actor_id, target = %swipe.target_id, "no reciprocal swipe");
            return Ok(None);
        };
        let reciprocal_target: String = row.get(0)?;

        let pair = match swipe.target_type {
            SwipeTarget::Listing => MatchPair {
                listing_id: swipe.target_id.clone(),
                buyer_id: swipe.actor_id.clone(),
                seller_id: swipe.target_owner_id.clone(),
                buyer_intent_id: reciprocal_target,
            },
            SwipeTarget::BuyerIntent => MatchPair {
                listing_id: reciprocal_target,
                buyer_id: swipe.target_owner_id.clone(),
                seller_id: swipe.actor_id.clone(),
                buyer_intent_id: swipe.target_id.clone(),
            },
        };
        self.create_match(pair).await
    }

    /// Insert a match unless the listing and buyer are already matched.
    async fn create_match(&self, pair: MatchPair) -> Result<Option<MutualMatch>, DatabaseError> {
        let id = self.db().generate_id(PREFIX_MATCH).await?;
        let now = Utc::now();
        let inserted = self
            .db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO matches ({MATCH_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(listing_id, buyer_id) DO NOTHING"
                ),
                libsql::params![
                    id.as_str(),
                    pair.listing_id.as_str(),
                    pair.buyer_id.as_str(),
                    pair.seller_id.as_str(),
                    pair.buyer_intent_id.as_str(),
                    MUTUAL_MATCH_SCORE,
                    now.to_rfc3339()
                ],
            )
            .await?;
        if inserted == 0 {
            debug!(listing = %pair.listing_id, buyer = %pair.buyer_id, "already matched");
            return Ok(None);
        }

        info!(match_id = %id, listing = %pair.listing_id, buyer = %pair.buyer_id, "mutual match");
        Ok(Some(MutualMatch {
            id,
            listing_id: pair.listing_id,
            buyer_id: pair.buyer_id,
            seller_id: pair.seller_id,
            buyer_intent_id: pair.buyer_intent_id,
            match_score: MUTUAL_MATCH_SCORE,
            created_at: now,
        }))
    }
}
