//! The single error boundary of the issue-analysis flow.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use triage::{AnnotatorError, ClassifierError};

use crate::webhook::{WebhookResponse, WebhookStatus};

/// Every failure the webhook handler can produce.
///
/// All variants except [`WebhookError::InvalidSignature`] map to HTTP 500 with
/// the same body shape; the sender cannot tell which step failed except from
/// the message text.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// A webhook secret is configured and the request signature did not match.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// The body is not JSON or lacks a required issue field.
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    /// The text-generation provider failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// A GitHub write failed.
    #[error(transparent)]
    Annotator(#[from] AnnotatorError),
}

impl WebhookError {
    /// HTTP status returned to the webhook sender.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!(status = status.as_u16(), error = %self, "Webhook processing failed");
        let body = WebhookResponse {
            status: WebhookStatus::Error,
            message: self.to_string(),
            timestamp: None,
        };
        (status, Json(body)).into_response()
    }
}
