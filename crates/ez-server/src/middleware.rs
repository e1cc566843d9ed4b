//! Request middleware: open CORS and the service-key access predicate.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Answer pre-flight requests directly and stamp every response with an
/// open `Access-Control-Allow-Origin`.
pub async fn cors(req: Request<Body>, next: Next) -> Response {
    let mut resp = if req.method() == Method::OPTIONS {
        (StatusCode::OK, "ok").into_response()
    } else {
        next.run(req).await
    };

    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    resp
}

/// Key presented by the caller: `Authorization: Bearer <key>` first, then
/// the `apikey` header.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    bearer.or_else(|| {
        headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    })
}

/// Gate for the database-backed endpoints. Open when no service keys are
/// configured.
pub async fn require_service_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.auth.is_enforced() {
        return next.run(req).await;
    }
    let authorized = presented_key(req.headers()).is_some_and(|key| state.auth.accepts(key));
    if authorized {
        return next.run(req).await;
    }
    debug!(path = %req.uri().path(), "rejected request without a valid service key");
    ApiError::Unauthorized.into_response()
}
