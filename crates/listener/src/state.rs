//! Shared handler state.

use std::sync::Arc;

use triage::{IssueAnnotator, IssueClassifier, IssueWriter, RelayConfig, TextGenerator};

/// State cloned into every request handler.
///
/// Nothing here is mutable; clones share the same configuration and HTTP
/// clients.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process configuration.
    pub config: Arc<RelayConfig>,
    /// Issue classifier (disabled when no provider is configured).
    pub classifier: IssueClassifier,
    /// Issue annotator (disabled when no GitHub writer is configured).
    pub annotator: IssueAnnotator,
}

impl AppState {
    /// Assembles handler state from configuration and the optional ports.
    pub fn new(
        config: RelayConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        writer: Option<Arc<dyn IssueWriter>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier: IssueClassifier::new(generator),
            annotator: IssueAnnotator::new(writer),
        }
    }
}
