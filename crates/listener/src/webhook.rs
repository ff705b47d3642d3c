//! GitHub `issues` webhook handling.
//!
//! Each delivery passes a sequence of gates. Failing a gate short-circuits to
//! an `ignored` response (HTTP 200) without any outbound call; every processing
//! failure after the gates funnels into [`WebhookError`] (HTTP 500).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, info_span, Instrument};

use triage::{DeliveryId, IssueNumber, IssueSubject, RepositoryId, Timestamp};

use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::state::AppState;
use crate::WebhookError;

/// Header naming the GitHub event type.
pub const EVENT_HEADER: &str = "X-GitHub-Event";

/// Header carrying the per-delivery GUID.
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

/// The only event type that is processed.
pub const ISSUES_EVENT: &str = "issues";

/// Issue actions that trigger analysis.
pub const PROCESSED_ACTIONS: &[&str] = &["opened", "reopened"];

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// The subset of a GitHub `issues` event payload the relay reads.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEventPayload {
    /// Event action (`opened`, `closed`, ...).
    pub action: String,
    /// The issue the event refers to.
    pub issue: IssuePayload,
    /// The repository the issue belongs to.
    pub repository: RepositoryPayload,
}

/// Issue fields from the event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body; GitHub sends `null` for an empty description.
    #[serde(default)]
    pub body: Option<String>,
    /// Labels already applied.
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
}

/// A label attached to the issue.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    /// Label name.
    pub name: String,
}

/// Repository fields from the event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// `owner/repo`.
    pub full_name: String,
}

impl IssuesEventPayload {
    /// Returns the content shown to the classifier.
    pub fn subject(&self) -> IssueSubject {
        IssueSubject::new(
            self.issue.title.clone(),
            self.issue.body.clone().unwrap_or_default(),
        )
        .with_labels(self.issue.labels.iter().map(|l| l.name.clone()).collect())
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Outcome reported to the webhook sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    /// The issue was classified and annotated.
    Success,
    /// The delivery was deliberately not processed.
    Ignored,
    /// Processing failed.
    Error,
}

/// JSON body of every webhook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Outcome.
    pub status: WebhookStatus,
    /// Human-readable detail.
    pub message: String,
    /// Completion time; only present on success.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

impl WebhookResponse {
    fn ignored(message: String) -> Json<Self> {
        info!(reason = %message, "Webhook delivery ignored");
        Json(Self {
            status: WebhookStatus::Ignored,
            message,
            timestamp: None,
        })
    }

    fn success(issue: IssueNumber) -> Json<Self> {
        Json(Self {
            status: WebhookStatus::Success,
            message: format!("Issue #{issue} analyzed and labeled"),
            timestamp: Some(Timestamp::now().to_iso8601()),
        })
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// `POST /webhook/github`.
///
/// # Errors
///
/// See [`WebhookError`]; every variant is rendered as a JSON error response.
pub async fn handle_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let delivery = header_str(&headers, DELIVERY_HEADER)
        .and_then(DeliveryId::new)
        .unwrap_or_else(DeliveryId::generate);
    let event_type = header_str(&headers, EVENT_HEADER).map(str::to_string);

    let span = info_span!(
        "github_webhook",
        delivery = %delivery,
        event = %event_type.as_deref().unwrap_or("unknown"),
    );

    process_delivery(state, headers, body, event_type)
        .instrument(span)
        .await
}

async fn process_delivery(
    state: AppState,
    headers: HeaderMap,
    body: Bytes,
    event_type: Option<String>,
) -> Result<Json<WebhookResponse>, WebhookError> {
    if let Some(secret) = &state.config.webhook_secret {
        if !verify_signature(secret, header_str(&headers, SIGNATURE_HEADER), &body) {
            return Err(WebhookError::InvalidSignature);
        }
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    let event_type = event_type.as_deref().unwrap_or("unknown");
    if event_type != ISSUES_EVENT {
        return Ok(WebhookResponse::ignored(format!(
            "Event type '{event_type}' not processed"
        )));
    }

    let action = payload
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    if !PROCESSED_ACTIONS.contains(&action) {
        return Ok(WebhookResponse::ignored(format!(
            "Action '{action}' not processed"
        )));
    }

    let event: IssuesEventPayload = serde_json::from_value(payload)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;
    let repository = RepositoryId::new(event.repository.full_name.clone()).ok_or_else(|| {
        WebhookError::MalformedPayload("repository.full_name is empty".to_string())
    })?;
    let issue = IssueNumber::new(event.issue.number);

    info!(%repository, %issue, action = %event.action, "Processing issue");

    let classification = state.classifier.classify(&event.subject()).await?;
    state
        .annotator
        .annotate(&repository, issue, &classification)
        .await?;

    info!(%repository, %issue, "Issue analyzed and labeled");
    Ok(WebhookResponse::success(issue))
}
