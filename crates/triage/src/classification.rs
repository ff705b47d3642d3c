//! The structured judgment produced for one issue.
//!
//! Every enumerated field is *open*: the text-generation provider is not a
//! trusted structured-output source, so a value outside the documented set is
//! kept verbatim in an `Other` variant instead of being rejected or rewritten.
//! Labels and comments therefore always show exactly what the model said.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Macro for open string enums.
// Generates: enum with known variants + Other(String), VALUES, as_str(),
// From<String>, From<Self> for String, Display. Serde goes through String.
// ---------------------------------------------------------------------------
macro_rules! open_enum {
    (
        $(#[$attr:meta])*
        $name:ident {
            $( $(#[$vattr:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vattr])* $variant, )+
            /// A value outside the documented set, preserved as returned.
            Other(String),
        }

        impl $name {
            /// The documented values, in the order they are offered to the model.
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// Returns the wire representation of this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $text, )+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $text => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// How urgently the issue needs attention.
    Priority {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

open_enum! {
    /// What kind of work the issue describes.
    Category {
        Bug => "bug",
        Feature => "feature",
        Enhancement => "enhancement",
        Documentation => "documentation",
        Question => "question",
        Infrastructure => "infrastructure",
    }
}

open_enum! {
    /// Rough size of the work.
    Effort {
        /// Under two hours.
        Quick => "quick",
        /// Two to eight hours.
        Medium => "medium",
        /// One to three days.
        Large => "large",
        /// More than three days.
        Epic => "epic",
    }
}

open_enum! {
    /// Potential impact of getting the change wrong.
    Risk {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

open_enum! {
    /// The team best placed to pick the issue up.
    Team {
        Frontend => "frontend",
        Backend => "backend",
        Devops => "devops",
        Design => "design",
        Qa => "qa",
    }
}

/// Summary used when the model's output cannot be recovered.
pub const FALLBACK_SUMMARY: &str = "AI analysis completed";

/// The structured classification of one issue.
///
/// Always fully populated. A field the model omits, or sends as anything other
/// than a string, takes its value from [`Classification::fallback`]; a
/// response with no recoverable JSON object is replaced by the fallback
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Urgency.
    #[serde(default = "Priority::fallback_value", deserialize_with = "string_or_fallback")]
    pub priority: Priority,

    /// Kind of work.
    #[serde(default = "Category::fallback_value", deserialize_with = "string_or_fallback")]
    pub category: Category,

    /// Size of the work.
    #[serde(default = "Effort::fallback_value", deserialize_with = "string_or_fallback")]
    pub effort: Effort,

    /// Impact if done wrong.
    #[serde(default = "Risk::fallback_value", deserialize_with = "string_or_fallback")]
    pub risk: Risk,

    /// Short free-text analysis from the model.
    #[serde(default = "String::fallback_value", deserialize_with = "string_or_fallback")]
    pub summary: String,

    /// Recommended owning team.
    #[serde(default = "Team::fallback_value", deserialize_with = "string_or_fallback")]
    pub team: Team,
}

impl Classification {
    /// The fixed classification substituted when the model's output is
    /// unusable.
    pub fn fallback() -> Self {
        Self {
            priority: Priority::fallback_value(),
            category: Category::fallback_value(),
            effort: Effort::fallback_value(),
            risk: Risk::fallback_value(),
            summary: String::fallback_value(),
            team: Team::fallback_value(),
        }
    }
}

/// Per-field value used when the model omits a field or sends a non-string.
trait FieldFallback {
    fn fallback_value() -> Self;
}

impl FieldFallback for Priority {
    fn fallback_value() -> Self {
        Self::Medium
    }
}

impl FieldFallback for Category {
    fn fallback_value() -> Self {
        Self::Question
    }
}

impl FieldFallback for Effort {
    fn fallback_value() -> Self {
        Self::Medium
    }
}

impl FieldFallback for Risk {
    fn fallback_value() -> Self {
        Self::Low
    }
}

impl FieldFallback for String {
    fn fallback_value() -> Self {
        FALLBACK_SUMMARY.to_string()
    }
}

impl FieldFallback for Team {
    fn fallback_value() -> Self {
        Self::Backend
    }
}

fn string_or_fallback<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + FieldFallback,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => T::from(text),
        _ => T::fallback_value(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fallback_values() {
        let fallback = Classification::fallback();
        assert_eq!(fallback.priority, Priority::Medium);
        assert_eq!(fallback.category, Category::Question);
        assert_eq!(fallback.effort, Effort::Medium);
        assert_eq!(fallback.risk, Risk::Low);
        assert_eq!(fallback.summary, "AI analysis completed");
        assert_eq!(fallback.team, Team::Backend);
    }

    #[test]
    fn test_known_values_deserialize_to_variants() {
        let parsed: Classification = serde_json::from_value(json!({
            "priority": "critical",
            "category": "infrastructure",
            "effort": "epic",
            "risk": "high",
            "summary": "Disk fills up",
            "team": "devops"
        }))
        .unwrap();

        assert_eq!(parsed.priority, Priority::Critical);
        assert_eq!(parsed.category, Category::Infrastructure);
        assert_eq!(parsed.effort, Effort::Epic);
        assert_eq!(parsed.risk, Risk::High);
        assert_eq!(parsed.team, Team::Devops);
    }

    #[test]
    fn test_unknown_values_are_passed_through() {
        let parsed: Classification = serde_json::from_value(json!({
            "priority": "URGENT",
            "category": "security",
            "effort": "medium",
            "risk": "low",
            "summary": "s",
            "team": "data"
        }))
        .unwrap();

        assert_eq!(parsed.priority, Priority::Other("URGENT".into()));
        assert_eq!(parsed.category.as_str(), "security");
        assert_eq!(parsed.team.to_string(), "data");

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["priority"], "URGENT");
        assert_eq!(back["category"], "security");
    }

    #[test]
    fn test_missing_fields_take_fallback_values() {
        let parsed: Classification =
            serde_json::from_value(json!({ "priority": "high", "summary": "partial" })).unwrap();

        assert_eq!(parsed.priority, Priority::High);
        assert_eq!(parsed.summary, "partial");
        assert_eq!(parsed.category, Category::Question);
        assert_eq!(parsed.team, Team::Backend);
    }

    #[test]
    fn test_non_string_fields_fall_back_individually() {
        let parsed: Classification = serde_json::from_value(json!({
            "priority": 3,
            "category": "bug",
            "effort": ["large"],
            "risk": "high",
            "summary": null,
            "team": "qa"
        }))
        .unwrap();

        assert_eq!(parsed.priority, Priority::Medium);
        assert_eq!(parsed.category, Category::Bug);
        assert_eq!(parsed.effort, Effort::Medium);
        assert_eq!(parsed.risk, Risk::High);
        assert_eq!(parsed.summary, FALLBACK_SUMMARY);
        assert_eq!(parsed.team, Team::Qa);
    }

    #[test]
    fn test_values_lists_match_documented_sets() {
        assert_eq!(Priority::VALUES, &["critical", "high", "medium", "low"]);
        assert_eq!(Team::VALUES, &["frontend", "backend", "devops", "design", "qa"]);
        assert_eq!(Category::VALUES.len(), 6);
    }
}
