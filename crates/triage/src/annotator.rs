//! Writes a [`Classification`] back to the originating GitHub issue.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    AnnotatorError, Classification, IssueNumber, IssueWriter, RepositoryId, Timestamp,
    WriteReceipt,
};

/// Name shown in the attribution footer of every analysis comment.
pub const ATTRIBUTION: &str = "Triage Relay";

/// Returns the three labels applied for `classification`, in the order
/// priority, type, effort.
pub fn labels_for(classification: &Classification) -> Vec<String> {
    vec![
        format!("priority:{}", classification.priority),
        format!("type:{}", classification.category),
        format!("effort:{}", classification.effort),
    ]
}

/// Renders the analysis comment posted on the issue.
pub fn render_comment(classification: &Classification, analysed_at: Timestamp) -> String {
    format!(
        "## 🤖 {ATTRIBUTION} Analysis

**Priority:** `{priority}`
**Category:** `{category}`
**Effort Estimate:** `{effort}`
**Risk Level:** `{risk}`

### Analysis
{summary}

**Recommended Team:** {team}

---
*Analyzed by {ATTRIBUTION} at {at} UTC*
",
        priority = classification.priority.as_str().to_uppercase(),
        category = classification.category,
        effort = classification.effort,
        risk = classification.risk,
        summary = classification.summary,
        team = classification.team,
        at = analysed_at.to_display_utc(),
    )
}

/// Applies labels and posts an analysis comment.
///
/// When no writer is configured both writes are skipped and `annotate`
/// succeeds.
#[derive(Clone)]
pub struct IssueAnnotator {
    writer: Option<Arc<dyn IssueWriter>>,
}

impl IssueAnnotator {
    /// Creates an annotator over `writer`.
    pub fn new(writer: Option<Arc<dyn IssueWriter>>) -> Self {
        Self { writer }
    }

    /// Returns `true` if a GitHub writer is configured.
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Labels the issue, then comments on it.
    ///
    /// The label write is issued first; if it fails the comment is not
    /// attempted. A comment failure does not undo the labels. Non-success HTTP
    /// statuses are logged but not treated as failures.
    ///
    /// # Errors
    ///
    /// [`AnnotatorError`] if either write fails to produce a response.
    #[instrument(skip_all, fields(repository = %repository, issue = %issue))]
    pub async fn annotate(
        &self,
        repository: &RepositoryId,
        issue: IssueNumber,
        classification: &Classification,
    ) -> Result<(), AnnotatorError> {
        let Some(writer) = &self.writer else {
            warn!("GitHub credential not configured; skipping label and comment writes");
            return Ok(());
        };

        let labels = labels_for(classification);
        let receipt = writer.add_labels(repository, issue, &labels).await?;
        log_receipt("labels", receipt);

        let comment = render_comment(classification, Timestamp::now());
        let receipt = writer.create_comment(repository, issue, &comment).await?;
        log_receipt("comment", receipt);

        Ok(())
    }
}

fn log_receipt(what: &str, receipt: WriteReceipt) {
    if receipt.is_success() {
        info!(status = receipt.status, "Issue {what} written");
    } else {
        warn!(status = receipt.status, "GitHub rejected issue {what} write");
    }
}

impl std::fmt::Debug for IssueAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueAnnotator")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{Category, Effort, Priority, Risk, Team, WriteOperation};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Labels(String, u64, Vec<String>),
        Comment(String, u64, String),
    }

    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<Call>>,
        label_status: u16,
        fail_comment: bool,
    }

    #[async_trait]
    impl IssueWriter for RecordingWriter {
        async fn add_labels(
            &self,
            repository: &RepositoryId,
            issue: IssueNumber,
            labels: &[String],
        ) -> Result<WriteReceipt, AnnotatorError> {
            self.calls.lock().unwrap().push(Call::Labels(
                repository.to_string(),
                issue.as_u64(),
                labels.to_vec(),
            ));
            Ok(WriteReceipt {
                status: if self.label_status == 0 { 200 } else { self.label_status },
            })
        }

        async fn create_comment(
            &self,
            repository: &RepositoryId,
            issue: IssueNumber,
            body: &str,
        ) -> Result<WriteReceipt, AnnotatorError> {
            self.calls.lock().unwrap().push(Call::Comment(
                repository.to_string(),
                issue.as_u64(),
                body.to_string(),
            ));
            if self.fail_comment {
                return Err(AnnotatorError::Transport {
                    operation: WriteOperation::CreateComment,
                    issue,
                    message: "connection reset".into(),
                });
            }
            Ok(WriteReceipt { status: 201 })
        }
    }

    fn classification() -> Classification {
        Classification {
            priority: Priority::High,
            category: Category::Bug,
            effort: Effort::Quick,
            risk: Risk::Medium,
            summary: "Null check missing in checkout handler.".into(),
            team: Team::Frontend,
        }
    }

    fn repo() -> RepositoryId {
        RepositoryId::new("octo/widgets").unwrap()
    }

    #[test]
    fn test_labels_for_classification() {
        assert_eq!(
            labels_for(&classification()),
            vec!["priority:high", "type:bug", "effort:quick"]
        );
    }

    #[test]
    fn test_labels_pass_through_unknown_values() {
        let mut c = classification();
        c.priority = Priority::from("P0");
        assert_eq!(labels_for(&c)[0], "priority:P0");
    }

    #[test]
    fn test_comment_embeds_all_fields() {
        let at = Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap());
        let comment = render_comment(&classification(), at);

        assert!(comment.contains("**Priority:** `HIGH`"));
        assert!(comment.contains("**Category:** `bug`"));
        assert!(comment.contains("**Effort Estimate:** `quick`"));
        assert!(comment.contains("**Risk Level:** `medium`"));
        assert!(comment.contains("Null check missing in checkout handler."));
        assert!(comment.contains("**Recommended Team:** frontend"));
        assert!(comment.contains("*Analyzed by Triage Relay at 2024-03-09 08:05:00 UTC*"));
    }

    #[tokio::test]
    async fn test_annotate_writes_labels_then_comment() {
        let writer = Arc::new(RecordingWriter::default());
        let annotator = IssueAnnotator::new(Some(writer.clone()));

        annotator
            .annotate(&repo(), IssueNumber::new(12), &classification())
            .await
            .unwrap();

        let calls = writer.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            Call::Labels(
                "octo/widgets".into(),
                12,
                vec!["priority:high".into(), "type:bug".into(), "effort:quick".into()]
            )
        );
        assert!(matches!(&calls[1], Call::Comment(r, 12, body) if r == "octo/widgets" && body.contains("HIGH")));
    }

    #[tokio::test]
    async fn test_rejected_status_is_not_an_error() {
        let writer = Arc::new(RecordingWriter {
            label_status: 401,
            ..Default::default()
        });
        let annotator = IssueAnnotator::new(Some(writer.clone()));

        let result = annotator
            .annotate(&repo(), IssueNumber::new(3), &classification())
            .await;

        assert!(result.is_ok());
        assert_eq!(writer.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_comment_failure_propagates_after_labels_written() {
        let writer = Arc::new(RecordingWriter {
            fail_comment: true,
            ..Default::default()
        });
        let annotator = IssueAnnotator::new(Some(writer.clone()));

        let err = annotator
            .annotate(&repo(), IssueNumber::new(5), &classification())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("create-comment"));
        let calls = writer.calls.lock().unwrap();
        assert!(matches!(calls[0], Call::Labels(..)));
    }

    #[tokio::test]
    async fn test_annotate_without_writer_is_a_no_op() {
        let annotator = IssueAnnotator::new(None);
        assert!(!annotator.is_enabled());

        annotator
            .annotate(&repo(), IssueNumber::new(1), &classification())
            .await
            .unwrap();
    }
}
