//! HTTP routing and the informational endpoints.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{any, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use triage::{ConfigurationSummary, Timestamp};

use crate::state::AppState;
use crate::webhook::handle_github_webhook;

/// Liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Configuration and endpoint summary.
pub const STATUS_PATH: &str = "/api/status";

/// GitHub webhook receiver.
pub const WEBHOOK_PATH: &str = "/webhook/github";

/// Service banner.
pub const ROOT_PATH: &str = "/";

/// Version of the JSON shapes served by this router.
pub const API_VERSION: &str = "1.0.0";

/// Name reported by the service banner.
pub const SERVICE_NAME: &str = "Triage Relay Webhook Server";

// ============================================================================
// Response types
// ============================================================================

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Current UTC time (ISO-8601).
    pub timestamp: String,
    /// Configured platform name.
    pub platform: String,
}

/// Known endpoint paths, as listed by `/api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointMap {
    /// Webhook receiver path.
    pub webhook: String,
    /// Health path.
    pub health: String,
    /// Status path.
    pub status: String,
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self {
            webhook: WEBHOOK_PATH.to_string(),
            health: HEALTH_PATH.to_string(),
            status: STATUS_PATH.to_string(),
        }
    }
}

/// `GET /api/status` body.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// [`API_VERSION`].
    pub api_version: String,
    /// Configured platform name.
    pub platform: String,
    /// Known endpoint paths.
    pub endpoints: EndpointMap,
    /// Credential presence and target repository.
    pub configuration: ConfigurationSummary,
    /// Current UTC time (ISO-8601).
    pub timestamp: String,
}

/// `GET /` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    /// [`SERVICE_NAME`].
    pub service: String,
    /// Configured platform name.
    pub platform: String,
    /// Always `"operational"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Current UTC time (ISO-8601).
    pub timestamp: String,
}

// ============================================================================
// Router
// ============================================================================

/// Largest webhook payload GitHub delivers.
pub const MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Builds the HTTP router.
///
/// Health, status, and banner answer any method. The webhook path only
/// accepts `POST`; other methods fall through to the 404 handler like any
/// unknown path. Request bodies up to [`MAX_PAYLOAD_BYTES`] are accepted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, any(health_handler))
        .route(STATUS_PATH, any(status_handler))
        .route(
            WEBHOOK_PATH,
            post(handle_github_webhook).fallback(not_found_handler),
        )
        .route(ROOT_PATH, any(root_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Timestamp::now().to_iso8601(),
        platform: state.config.platform.clone(),
    })
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        api_version: API_VERSION.to_string(),
        platform: state.config.platform.clone(),
        endpoints: EndpointMap::default(),
        configuration: state.config.summary(),
        timestamp: Timestamp::now().to_iso8601(),
    })
}

async fn root_handler(State(state): State<AppState>) -> Json<BannerResponse> {
    Json(BannerResponse {
        service: SERVICE_NAME.to_string(),
        platform: state.config.platform.clone(),
        status: "operational".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Timestamp::now().to_iso8601(),
    })
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
