//! Swipes: verification gate, then storage and mutual-match detection.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use ez_core::entities::{SwipeActor, SwipeDecision};
use ez_core::enums::{SwipeDirection, SwipeTarget};
use ez_core::responses::SwipeOutcome;
use ez_db::repos::swipe::NewSwipe;

use super::{non_empty_str, parse_enum};
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateSwipeRequest {
    actor_id: Option<Value>,
    actor: Option<SwipeActor>,
    target_type: Option<Value>,
    target_id: Option<Value>,
    target_owner_id: Option<Value>,
    direction: Option<Value>,
}

pub async fn create_swipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateSwipeRequest>, JsonRejection>,
) -> Result<Json<SwipeOutcome>, ApiError> {
    let Json(req) = payload?;
    let (
        Some(actor_id),
        Some(actor),
        Some(target_type),
        Some(target_id),
        Some(target_owner_id),
        Some(direction),
    ) = (
        non_empty_str(req.actor_id.as_ref()),
        req.actor,
        non_empty_str(req.target_type.as_ref()),
        non_empty_str(req.target_id.as_ref()),
        non_empty_str(req.target_owner_id.as_ref()),
        non_empty_str(req.direction.as_ref()),
    )
    else {
        return Err(ApiError::bad_request("Missing required fields"));
    };
    let target_type: SwipeTarget =
        parse_enum(target_type).ok_or_else(|| ApiError::bad_request("Invalid target_type"))?;
    let direction: SwipeDirection =
        parse_enum(direction).ok_or_else(|| ApiError::bad_request("Invalid direction"))?;

    if let SwipeDecision::Denied { reason, .. } =
        ez_match::eligibility::check_swipe(&actor, target_type, direction)
    {
        debug!(actor_id, role = %actor.role, %target_type, "swipe denied by verification gate");
        return Err(ApiError::Forbidden(reason));
    }

    let outcome = state
        .service
        .record_swipe(&NewSwipe {
            actor_id: actor_id.to_string(),
            target_type,
            target_id: target_id.to_string(),
            target_owner_id: target_owner_id.to_string(),
            direction,
        })
        .await?;
    if let Some(m) = &outcome.mutual_match {
        info!(match_id = %m.id, tasks = outcome.tasks.len(), "create-swipe matched");
    }
    Ok(Json(outcome))
}
