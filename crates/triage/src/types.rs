//! Shared value types for the triage domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the request-scoped content that flows from the webhook into the classifier.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Issue content
// ---------------------------------------------------------------------------

/// The parts of a GitHub issue that are shown to the text-generation provider.
///
/// Constructed once per webhook delivery from the event payload and discarded
/// when the request completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSubject {
    /// Issue title as written by the author.
    pub title: String,

    /// Issue body. Empty when the author left the description blank.
    pub body: String,

    /// Names of the labels already applied to the issue.
    pub labels: Vec<String>,
}

impl IssueSubject {
    /// Creates an [`IssueSubject`] with no existing labels.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            labels: Vec::new(),
        }
    }

    /// Replaces the existing label list.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Formats the timestamp as ISO-8601 with millisecond precision and a `Z`
    /// suffix (e.g. `2024-05-01T12:00:00.000Z`).
    pub fn to_iso8601(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Formats the timestamp for human-readable text (`2024-05-01 12:00:00`).
    pub fn to_display_utc(self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_formats() {
        let ts = Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap());
        assert_eq!(ts.to_iso8601(), "2024-05-01T12:30:05.000Z");
        assert_eq!(ts.to_display_utc(), "2024-05-01 12:30:05");
        assert_eq!(ts.to_string(), ts.to_iso8601());
    }

    #[test]
    fn test_issue_subject_with_labels() {
        let subject = IssueSubject::new("Crash", "").with_labels(vec!["bug".into()]);
        assert_eq!(subject.labels, vec!["bug".to_string()]);
        assert!(subject.body.is_empty());
    }
}
