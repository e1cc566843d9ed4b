//! Stateless function endpoints backed by `ez-match`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ez_core::entities::{
    BuyerIntent, BuyerNeed, CandidateListing, Listing, ListingFacts, MatchResult, SwipeActor,
};
use ez_core::enums::{SuggestionKind, SwipeDirection, SwipeTarget};
use ez_core::responses::{
    ListingSummaryResponse, MatchmakeResponse, SuggestTasksResponse, SwipeEligibilityResponse,
    TriageResponse,
};

use super::{non_empty_str, parse_enum};
use crate::error::ApiError;

type Payload<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    text: Option<Value>,
}

impl TextRequest {
    fn text(&self) -> Result<&str, ApiError> {
        self.text
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::bad_request("Text is required"))
    }
}

pub async fn parse_intent(payload: Payload<TextRequest>) -> Result<Json<BuyerNeed>, ApiError> {
    let Json(req) = payload?;
    let need = ez_match::intent::parse(req.text()?);
    debug!(?need, "parse-intent");
    Ok(Json(need))
}

#[derive(Debug, Deserialize)]
pub struct ScoreLeadRequest {
    need: Option<BuyerNeed>,
    listing: Option<Listing>,
    #[serde(rename = "buyerVerification")]
    buyer_verification: Option<i64>,
}

pub async fn score_lead(payload: Payload<ScoreLeadRequest>) -> Result<Json<MatchResult>, ApiError> {
    let Json(req) = payload?;
    let (Some(need), Some(listing)) = (req.need, req.listing) else {
        return Err(ApiError::bad_request("Need and listing are required"));
    };
    let result = ez_match::score::score(&need, &listing, req.buyer_verification.unwrap_or(0));
    debug!(score = result.score, "score-lead");
    Ok(Json(result))
}

pub async fn triage_message(
    payload: Payload<TextRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let Json(req) = payload?;
    let label = ez_match::triage::classify(req.text()?);
    debug!(%label, "triage-message");
    Ok(Json(TriageResponse { label }))
}

#[derive(Debug, Deserialize)]
pub struct SuggestTasksRequest {
    #[serde(rename = "type")]
    kind: Option<Value>,
    stage: Option<Value>,
    roles: Option<Vec<String>>,
}

/// Unknown `type` values are not an error; they suggest nothing.
pub async fn suggest_tasks(
    payload: Payload<SuggestTasksRequest>,
) -> Result<Json<SuggestTasksResponse>, ApiError> {
    let Json(req) = payload?;
    let (Some(kind), Some(stage)) = (
        non_empty_str(req.kind.as_ref()),
        non_empty_str(req.stage.as_ref()),
    ) else {
        return Err(ApiError::bad_request("Type and stage are required"));
    };

    let roles = req.roles.unwrap_or_default();
    let tasks = parse_enum::<SuggestionKind>(kind)
        .map(|kind| ez_match::suggest::suggest(kind, stage, &roles))
        .unwrap_or_default();
    debug!(kind, stage, count = tasks.len(), "suggest-tasks");
    Ok(Json(SuggestTasksResponse { tasks }))
}

#[derive(Debug, Deserialize)]
pub struct MatchmakeRequest {
    intent: Option<BuyerIntent>,
    listings: Option<Vec<CandidateListing>>,
}

pub async fn matchmake(
    payload: Payload<MatchmakeRequest>,
) -> Result<Json<MatchmakeResponse>, ApiError> {
    let Json(req) = payload?;
    let intent = req
        .intent
        .ok_or_else(|| ApiError::bad_request("Intent is required"))?;
    let listings = req.listings.unwrap_or_default();
    let matches = ez_match::matchmake::rank(&intent, &listings);
    debug!(candidates = listings.len(), "matchmake");
    Ok(Json(MatchmakeResponse { matches }))
}

#[derive(Debug, Deserialize)]
pub struct SwipeEligibilityRequest {
    actor: Option<SwipeActor>,
    target_type: Option<Value>,
    direction: Option<Value>,
}

pub async fn swipe_eligibility(
    payload: Payload<SwipeEligibilityRequest>,
) -> Result<Json<SwipeEligibilityResponse>, ApiError> {
    let Json(req) = payload?;
    let (Some(actor), Some(target), Some(direction)) = (
        req.actor,
        non_empty_str(req.target_type.as_ref()),
        non_empty_str(req.direction.as_ref()),
    ) else {
        return Err(ApiError::bad_request(
            "actor, target_type, and direction are required",
        ));
    };
    let target: SwipeTarget =
        parse_enum(target).ok_or_else(|| ApiError::bad_request("Invalid target_type"))?;
    let direction: SwipeDirection =
        parse_enum(direction).ok_or_else(|| ApiError::bad_request("Invalid direction"))?;

    let decision = ez_match::eligibility::check_swipe(&actor, target, direction);
    debug!(role = %actor.role, %target, %direction, allowed = decision.is_allowed(), "swipe-eligibility");
    Ok(Json(decision.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListingSummaryRequest {
    listing: Option<ListingFacts>,
}

pub async fn listing_summary(
    payload: Payload<ListingSummaryRequest>,
) -> Result<Json<ListingSummaryResponse>, ApiError> {
    let Json(req) = payload?;
    let listing = req
        .listing
        .ok_or_else(|| ApiError::bad_request("Listing is required"))?;
    let summary = ez_match::summary::summarize(&listing);
    debug!(lines = summary.len(), "listing-summary");
    Ok(Json(ListingSummaryResponse::deterministic(summary)))
}
