//! # ez-server
//!
//! HTTP surface for Ezriya. Every function is a `POST /functions/v1/<name>`
//! taking and returning JSON:
//!
//! | Endpoint                    | Backed by                  | Service key |
//! |-----------------------------|----------------------------|-------------|
//! | `parse-intent`              | `ez_match::intent`         | no          |
//! | `score-lead`                | `ez_match::score`          | no          |
//! | `triage-message`            | `ez_match::triage`         | no          |
//! | `suggest-tasks`             | `ez_match::suggest`        | no          |
//! | `matchmake`                 | `ez_match::matchmake`      | no          |
//! | `swipe-eligibility`         | `ez_match::eligibility`    | no          |
//! | `listing-summary`           | `ez_match::summary`        | no          |
//! | `ai-generate-tasks`         | `EzService::generate_tasks`| yes         |
//! | `maintenance-overdue-tasks` | `EzService::overdue_report`| yes         |
//! | `update-task-status`        | `EzService::transition_task`| yes        |
//! | `create-swipe`              | `EzService::record_swipe`  | yes         |
//! | `verify-listing`            | `EzService::verify_listing`| yes         |
//! | `maintenance-unverify-stale`| `EzService::unverify_stale_listings` | yes |
//!
//! Service keys are only checked when `auth.service_keys` is configured.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};

use ez_config::{AuthConfig, MaintenanceConfig};
use ez_db::service::EzService;

/// Shared handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EzService>,
    pub auth: Arc<AuthConfig>,
    pub maintenance: Arc<MaintenanceConfig>,
}

impl AppState {
    /// State with default maintenance settings.
    #[must_use]
    pub fn new(service: EzService, auth: AuthConfig) -> Self {
        Self {
            service: Arc::new(service),
            auth: Arc::new(auth),
            maintenance: Arc::new(MaintenanceConfig::default()),
        }
    }

    #[must_use]
    pub fn with_maintenance(mut self, maintenance: MaintenanceConfig) -> Self {
        self.maintenance = Arc::new(maintenance);
        self
    }
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let protected = Router::new()
        .route(
            "/functions/v1/ai-generate-tasks",
            post(handlers::tasks::ai_generate_tasks),
        )
        .route(
            "/functions/v1/maintenance-overdue-tasks",
            post(handlers::tasks::maintenance_overdue_tasks),
        )
        .route(
            "/functions/v1/update-task-status",
            post(handlers::tasks::update_task_status),
        )
        .route(
            "/functions/v1/create-swipe",
            post(handlers::swipes::create_swipe),
        )
        .route(
            "/functions/v1/verify-listing",
            post(handlers::listings::verify_listing),
        )
        .route(
            "/functions/v1/maintenance-unverify-stale",
            post(handlers::listings::maintenance_unverify_stale),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_service_key,
        ));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/functions/v1/parse-intent",
            post(handlers::functions::parse_intent),
        )
        .route(
            "/functions/v1/score-lead",
            post(handlers::functions::score_lead),
        )
        .route(
            "/functions/v1/triage-message",
            post(handlers::functions::triage_message),
        )
        .route(
            "/functions/v1/suggest-tasks",
            post(handlers::functions::suggest_tasks),
        )
        .route(
            "/functions/v1/matchmake",
            post(handlers::functions::matchmake),
        )
        .route(
            "/functions/v1/swipe-eligibility",
            post(handlers::functions::swipe_eligibility),
        )
        .route(
            "/functions/v1/listing-summary",
            post(handlers::functions::listing_summary),
        )
        .merge(protected)
        .layer(from_fn(middleware::cors))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
