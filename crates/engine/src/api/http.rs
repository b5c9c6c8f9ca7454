//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use vdm_domain::DomainError;
use vdm_shared::ErrorResponse;

use super::{store, templates, tracker};
use crate::app::App;
use crate::use_cases::tracker::TrackerError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        // Remote template store
        .route("/api/clickhouse/test", get(store::test_connection))
        .route("/api/clickhouse/init", post(store::init))
        .route("/api/clickhouse/tokens", get(store::list_tokens))
        .route("/api/clickhouse/save-token", post(store::save_token))
        // Premade templates (file catalog + store)
        .route("/api/tokens", get(templates::load_all))
        .route("/api/tokens/save", post(templates::save))
        // Tracker
        .route("/api/tracker", get(tracker::view))
        .route("/api/tracker/tokens", post(tracker::add))
        .route("/api/tracker/tokens/premade", post(tracker::add_premade))
        .route(
            "/api/tracker/tokens/{index}",
            put(tracker::update).delete(tracker::remove),
        )
        .route("/api/tracker/tokens/{index}/hp", put(tracker::set_hp))
        .route("/api/tracker/tokens/{index}/hp/adjust", post(tracker::adjust_hp))
        .route("/api/tracker/tokens/{index}/faction", post(tracker::toggle_faction))
        .route("/api/tracker/tokens/{index}/save", post(tracker::save))
        .route("/api/tracker/next", post(tracker::next))
        .route("/api/tracker/previous", post(tracker::previous))
        .route("/api/tracker/select/{index}", post(tracker::select))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Errors
// =============================================================================

/// Failure response. Every variant renders `{success: false, error}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.message())
        } else {
            ApiError::BadRequest(e.message())
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Domain(e) => e.into(),
        }
    }
}

// =============================================================================
// Extractors
// =============================================================================

/// `Json` whose rejection is rendered as an [`ApiError`].
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        json_request, read_json, request, test_app, test_app_with, TestPorts,
    };
    use axum::http::Method;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_returns_ok() {
        let response = test_app()
            .oneshot(request(Method::GET, "/api/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request_envelope() {
        let response = test_app()
            .oneshot(json_request(Method::POST, "/api/tracker/tokens", "{ not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn domain_errors_map_to_status_codes() {
        let response = ApiError::from(DomainError::not_found("Combatant", "4")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = read_json(response).await;
        assert_eq!(body, json!({"success": false, "error": "Combatant 4 not found"}));

        let response =
            ApiError::from(DomainError::validation("Token name is required")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = test_app_with(TestPorts::default());
        let response = app
            .oneshot(request(Method::GET, "/api/nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
