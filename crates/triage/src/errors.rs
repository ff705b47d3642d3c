//! Component error types for the triage domain.
//!
//! [`ClassifierError`] and [`AnnotatorError`] are produced by the port
//! implementations in the infrastructure crates and propagate unchanged to the
//! webhook boundary, which maps every one of them to the same HTTP 500 response.
//! [`ConfigError`] is only produced while building [`crate::RelayConfig`] at
//! startup.
//!
//! An unparseable model response is deliberately *not* an error: the classifier
//! recovers from it locally (see [`crate::Classification::fallback`]).

use thiserror::Error;

use crate::IssueNumber;

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// The text-generation provider could not produce a response to classify.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// The provider answered with a non-success HTTP status.
    #[error("Text-generation provider returned HTTP {status}")]
    Unavailable {
        /// HTTP status code returned by the provider.
        status: u16,
    },

    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("Text-generation request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The provider answered 2xx but the envelope had no text block to read.
    ///
    /// Distinct from an unparseable *classification*, which falls back.
    #[error("Text-generation response was malformed: {message}")]
    MalformedResponse {
        /// What was missing or invalid.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Annotator
// ---------------------------------------------------------------------------

/// Which of the two independent GitHub writes an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOperation {
    /// `POST /repos/{repo}/issues/{n}/labels`
    AddLabels,
    /// `POST /repos/{repo}/issues/{n}/comments`
    CreateComment,
}

impl std::fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddLabels => f.write_str("add-labels"),
            Self::CreateComment => f.write_str("create-comment"),
        }
    }
}

/// A GitHub write call failed before a response was received.
///
/// Non-success HTTP statuses are reported through [`crate::WriteReceipt`]
/// instead and do not produce this error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotatorError {
    /// The request never produced an HTTP response.
    #[error("GitHub {operation} request for issue #{issue} failed: {message}")]
    Transport {
        /// The write that failed.
        operation: WriteOperation,
        /// The issue being annotated.
        issue: IssueNumber,
        /// Description of the transport failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Startup configuration is invalid; the process refuses to start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The platform name is blank.
    #[error("Platform name must not be empty")]
    EmptyPlatform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_status() {
        let err = ClassifierError::Unavailable { status: 503 };
        assert_eq!(err.to_string(), "Text-generation provider returned HTTP 503");
    }

    #[test]
    fn test_annotator_message_names_operation_and_issue() {
        let err = AnnotatorError::Transport {
            operation: WriteOperation::CreateComment,
            issue: IssueNumber::new(7),
            message: "connection reset".into(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub create-comment request for issue #7 failed: connection reset"
        );
    }
}
