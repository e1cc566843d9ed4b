//! Listing post verification and the stale-verification sweep.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ez_core::entities::ListingPost;
use ez_core::responses::StaleListingReport;

use super::non_empty_str;
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyListingRequest {
    listing_post_id: Option<Value>,
}

pub async fn verify_listing(
    State(state): State<AppState>,
    payload: Result<Json<VerifyListingRequest>, JsonRejection>,
) -> Result<Json<ListingPost>, ApiError> {
    let Json(req) = payload?;
    let id = non_empty_str(req.listing_post_id.as_ref())
        .ok_or_else(|| ApiError::bad_request("listing_post_id is required"))?;
    let post = state.service.verify_listing(id, Utc::now()).await?;
    debug!(listing = id, "verify-listing");
    Ok(Json(post))
}

/// Unverifies listings older than `maintenance.stale_listing_days`. The
/// request body is ignored.
pub async fn maintenance_unverify_stale(
    State(state): State<AppState>,
) -> Result<Json<StaleListingReport>, ApiError> {
    let days = state.maintenance.stale_listing_days;
    let ids = state.service.unverify_stale_listings(Utc::now(), days).await?;
    debug!(count = ids.len(), days, "maintenance-unverify-stale");
    Ok(Json(StaleListingReport::unverified(ids)))
}
