//! Webhook listener.
//!
//! Binds an HTTP server, answers the informational endpoints, and runs the
//! issue-analysis flow for GitHub `issues` deliveries:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | any | `/health` | liveness report |
//! | any | `/api/status` | endpoint map and configuration summary |
//! | `POST` | `/webhook/github` | [`webhook::handle_github_webhook`] |
//! | any | `/` | service banner |
//! | * | anything else | `404 Not Found` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP routing, header handling, payload deserialization,
//! and signature verification live here. Classification and annotation are
//! delegated to [`triage::IssueClassifier`] and [`triage::IssueAnnotator`].

pub mod errors;
pub mod routes;
pub mod server;
pub mod signature;
pub mod state;
pub mod webhook;


pub use errors::WebhookError;
pub use routes::{
    build_router, API_VERSION, HEALTH_PATH, MAX_PAYLOAD_BYTES, ROOT_PATH, SERVICE_NAME,
    STATUS_PATH, WEBHOOK_PATH,
};
pub use server::run_server;
pub use signature::{verify_signature, SIGNATURE_HEADER};
pub use state::AppState;
pub use webhook::{
    IssuesEventPayload, WebhookResponse, WebhookStatus, DELIVERY_HEADER, EVENT_HEADER,
};
