//! Recovery of a [`Classification`] from free-form model output.

use crate::Classification;

/// Extracts a classification from the raw text returned by the provider.
///
/// Returns `None` when nothing usable is found; the caller substitutes
/// [`Classification::fallback`].
pub trait ResponseParser: Send + Sync {
    /// Attempts to recover a classification from `text`.
    fn parse(&self, text: &str) -> Option<Classification>;
}

/// Takes the span from the first `{` to the last `}` and parses it as JSON.
///
/// Tolerates prose before and after the object. If the model emits more than
/// one object, the span covers all of them and parsing fails, which yields the
/// fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBraceParser;

impl GreedyBraceParser {
    /// Returns the greedy `{ ... }` span of `text`, if there is one.
    pub fn candidate_span(text: &str) -> Option<&str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        (end > start).then(|| &text[start..=end])
    }
}

impl ResponseParser for GreedyBraceParser {
    fn parse(&self, text: &str) -> Option<Classification> {
        let span = Self::candidate_span(text)?;
        match serde_json::from_str::<Classification>(span) {
            Ok(classification) => Some(classification),
            Err(e) => {
                tracing::debug!(error = %e, "Candidate JSON span did not parse as a classification");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Effort, Priority, Risk, Team};

    #[test]
    fn test_object_embedded_in_prose_is_returned_exactly() {
        let text = r#"Sure! Here is my assessment:
{"priority":"high","category":"bug","effort":"quick","risk":"low","summary":"x","team":"backend"}
Let me know if you need anything else."#;

        let parsed = GreedyBraceParser.parse(text).expect("object should parse");
        assert_eq!(
            parsed,
            Classification {
                priority: Priority::High,
                category: Category::Bug,
                effort: Effort::Quick,
                risk: Risk::Low,
                summary: "x".into(),
                team: Team::Backend,
            }
        );
    }

    #[test]
    fn test_fenced_code_block_is_tolerated() {
        let text = "```json\n{\"priority\":\"low\",\"category\":\"documentation\",\"effort\":\"quick\",\"risk\":\"low\",\"summary\":\"typo\",\"team\":\"frontend\"}\n```";
        let parsed = GreedyBraceParser.parse(text).unwrap();
        assert_eq!(parsed.category, Category::Documentation);
        assert_eq!(parsed.team, Team::Frontend);
    }

    #[test]
    fn test_no_braces_yields_none() {
        assert!(GreedyBraceParser.parse("I could not classify this issue.").is_none());
        assert!(GreedyBraceParser.parse("").is_none());
    }

    #[test]
    fn test_reversed_braces_yield_none() {
        assert_eq!(GreedyBraceParser::candidate_span("} nothing {"), None);
    }

    #[test]
    fn test_invalid_json_yields_none() {
        assert!(GreedyBraceParser.parse("{priority: high}").is_none());
    }

    #[test]
    fn test_span_is_greedy_across_multiple_objects() {
        let text = r#"Example: {"a": 1} and answer {"priority":"high"}"#;
        assert_eq!(
            GreedyBraceParser::candidate_span(text),
            Some(r#"{"a": 1} and answer {"priority":"high"}"#)
        );
        assert!(GreedyBraceParser.parse(text).is_none());
    }

    #[test]
    fn test_null_summary_keeps_the_other_fields() {
        let text = r#"{"priority":"critical","category":"bug","effort":"large","risk":"high","summary":null,"team":"devops"}"#;
        let parsed = GreedyBraceParser.parse(text).unwrap();
        assert_eq!(parsed.priority, Priority::Critical);
        assert_eq!(parsed.team, Team::Devops);
        assert_eq!(parsed.summary, crate::FALLBACK_SUMMARY);
    }

    #[test]
    fn test_nested_braces_inside_summary_are_kept() {
        let text = r#"{"priority":"low","summary":"use {braces} carefully"}"#;
        let parsed = GreedyBraceParser.parse(text).unwrap();
        assert_eq!(parsed.summary, "use {braces} carefully");
    }
}
