//! Port traits implemented by the infrastructure crates.
//!
//! The `llm` crate implements [`TextGenerator`]; the `github` crate implements
//! [`IssueWriter`]. This crate never sees HTTP details.

use async_trait::async_trait;

use crate::{AnnotatorError, ClassifierError, IssueNumber, RepositoryId};

/// A text-generation provider that turns a prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` and returns the first text block of the response.
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::Unavailable`] on a non-success HTTP status.
    /// - [`ClassifierError::Transport`] if no response was received.
    /// - [`ClassifierError::MalformedResponse`] if the response carried no text.
    async fn generate(&self, prompt: &str) -> Result<String, ClassifierError>;
}

/// Outcome of one GitHub write that produced an HTTP response.
///
/// The annotator records but does not act on the status; callers that want
/// stricter behaviour can inspect [`WriteReceipt::is_success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReceipt {
    /// HTTP status code returned by GitHub.
    pub status: u16,
}

impl WriteReceipt {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Writes annotations back to a GitHub issue.
///
/// The two operations are independent: neither is rolled back if the other
/// fails, and neither is idempotent beyond what GitHub itself guarantees.
#[async_trait]
pub trait IssueWriter: Send + Sync {
    /// Adds `labels` to the issue. Labels already present are left untouched by
    /// GitHub.
    ///
    /// # Errors
    ///
    /// [`AnnotatorError::Transport`] if no response was received.
    async fn add_labels(
        &self,
        repository: &RepositoryId,
        issue: IssueNumber,
        labels: &[String],
    ) -> Result<WriteReceipt, AnnotatorError>;

    /// Posts a new comment with `body` on the issue.
    ///
    /// # Errors
    ///
    /// [`AnnotatorError::Transport`] if no response was received.
    async fn create_comment(
        &self,
        repository: &RepositoryId,
        issue: IssueNumber,
        body: &str,
    ) -> Result<WriteReceipt, AnnotatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_success_range() {
        assert!(WriteReceipt { status: 200 }.is_success());
        assert!(WriteReceipt { status: 201 }.is_success());
        assert!(!WriteReceipt { status: 304 }.is_success());
        assert!(!WriteReceipt { status: 401 }.is_success());
    }
}
