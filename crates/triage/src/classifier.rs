//! Issue classification over a [`TextGenerator`].

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    build_classification_prompt, Classification, ClassifierError, GreedyBraceParser,
    IssueSubject, ResponseParser, TextGenerator,
};

/// Produces a [`Classification`] for an issue.
///
/// Provider failures propagate; unusable provider *output* never does. When no
/// generator is configured, every issue receives the fallback without an
/// outbound call.
#[derive(Clone)]
pub struct IssueClassifier {
    generator: Option<Arc<dyn TextGenerator>>,
    parser: Arc<dyn ResponseParser>,
}

impl IssueClassifier {
    /// Creates a classifier using the greedy brace parser.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            parser: Arc::new(GreedyBraceParser),
        }
    }

    /// Replaces the response parser.
    pub fn with_parser(mut self, parser: Arc<dyn ResponseParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Returns `true` if a text-generation provider is configured.
    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Classifies `issue`.
    ///
    /// # Errors
    ///
    /// Any [`ClassifierError`] returned by the provider. A response with no
    /// recoverable JSON object is not an error; it yields
    /// [`Classification::fallback`].
    #[instrument(skip_all, fields(title = %issue.title))]
    pub async fn classify(&self, issue: &IssueSubject) -> Result<Classification, ClassifierError> {
        let Some(generator) = &self.generator else {
            warn!("Text-generation credential not configured; using fallback classification");
            return Ok(Classification::fallback());
        };

        let prompt = build_classification_prompt(issue);
        let text = generator.generate(&prompt).await?;
        debug!(response_len = text.len(), "Received text-generation response");

        match self.parser.parse(&text) {
            Some(classification) => {
                info!(
                    priority = %classification.priority,
                    category = %classification.category,
                    effort = %classification.effort,
                    "Issue classified"
                );
                Ok(classification)
            }
            None => {
                warn!("Model response contained no usable JSON object; using fallback classification");
                Ok(Classification::fallback())
            }
        }
    }
}

impl std::fmt::Debug for IssueClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueClassifier")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}
