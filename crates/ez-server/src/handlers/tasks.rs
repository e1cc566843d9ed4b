//! Database-backed endpoints. Routed behind the service-key predicate.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use ez_core::entities::{Task, TaskContext};
use ez_core::enums::TaskStatus;
use ez_core::responses::{GenerationReport, OverdueReport};

use super::{non_empty_str, parse_enum};
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct GenerateTasksRequest {
    deal_id: Option<Value>,
    listing_post_id: Option<Value>,
    stage: Option<Value>,
}

pub async fn ai_generate_tasks(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTasksRequest>, JsonRejection>,
) -> Result<Json<GenerationReport>, ApiError> {
    let Json(req) = payload?;
    let stage = non_empty_str(req.stage.as_ref())
        .ok_or_else(|| ApiError::bad_request("Stage is required"))?;
    let context = TaskContext::from_ids(
        non_empty_str(req.deal_id.as_ref()),
        non_empty_str(req.listing_post_id.as_ref()),
    )
    .ok_or_else(|| ApiError::bad_request("Either deal_id or listing_post_id is required"))?;

    debug!(stage, context = context.id(), "ai-generate-tasks");
    let report = state.service.generate_tasks(&context, stage).await?;
    info!(stage, context = context.id(), count = report.count, "generated tasks");
    Ok(Json(report))
}

/// Scans for overdue tasks as of now. The request body is ignored.
pub async fn maintenance_overdue_tasks(
    State(state): State<AppState>,
) -> Result<Json<OverdueReport>, ApiError> {
    let report = state.service.overdue_report(Utc::now()).await?;
    debug!(task_count = report.task_count, "maintenance-overdue-tasks");
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    task_id: Option<Value>,
    status: Option<Value>,
}

pub async fn update_task_status(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskStatusRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(req) = payload?;
    let (Some(task_id), Some(status)) = (
        non_empty_str(req.task_id.as_ref()),
        non_empty_str(req.status.as_ref()),
    ) else {
        return Err(ApiError::bad_request("task_id and status are required"));
    };
    let status: TaskStatus =
        parse_enum(status).ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    debug!(task_id, %status, "update-task-status");
    let task = state
        .service
        .transition_task(task_id, status)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::NotFound(_) => ApiError::NotFound(format!("Task not found: {task_id}")),
            other => other,
        })?;
    Ok(Json(task))
}
