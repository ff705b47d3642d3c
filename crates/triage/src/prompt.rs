//! Prompt construction for issue classification.

use crate::{Category, Effort, IssueSubject, Priority, Risk, Team};

/// Builds the instruction sent to the text-generation provider.
///
/// The prompt names the six classification fields, lists the documented values
/// of each enumerated field, and asks for a single JSON object. The model is
/// still free to wrap that object in prose; see [`crate::ResponseParser`].
pub fn build_classification_prompt(issue: &IssueSubject) -> String {
    let body = if issue.body.trim().is_empty() {
        "No description provided"
    } else {
        issue.body.as_str()
    };
    let labels = if issue.labels.is_empty() {
        "None".to_string()
    } else {
        issue.labels.join(", ")
    };

    format!(
        r#"Analyze this GitHub issue and provide:
1. Priority level ({priorities})
2. Category ({categories})
3. Effort estimate ({efforts})
4. Risk level ({risks})
5. Brief analysis summary
6. Recommended team ({teams})

Issue Title: {title}
Issue Description: {body}
Current Labels: {labels}

Respond with a single JSON object containing exactly these fields:
{{
  "priority": "high",
  "category": "bug",
  "effort": "medium",
  "risk": "medium",
  "summary": "Brief analysis here",
  "team": "backend"
}}"#,
        priorities = Priority::VALUES.join("/"),
        categories = Category::VALUES.join("/"),
        efforts = Effort::VALUES.join("/"),
        risks = Risk::VALUES.join("/"),
        teams = Team::VALUES.join("/"),
        title = issue.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_issue_and_value_sets() {
        let issue = IssueSubject::new("Login fails", "Stack trace attached")
            .with_labels(vec!["bug".into(), "auth".into()]);
        let prompt = build_classification_prompt(&issue);

        assert!(prompt.contains("Issue Title: Login fails"));
        assert!(prompt.contains("Issue Description: Stack trace attached"));
        assert!(prompt.contains("Current Labels: bug, auth"));
        assert!(prompt.contains("(critical/high/medium/low)"));
        assert!(prompt.contains("(bug/feature/enhancement/documentation/question/infrastructure)"));
        assert!(prompt.contains("(quick/medium/large/epic)"));
        assert!(prompt.contains("(high/medium/low)"));
        assert!(prompt.contains("(frontend/backend/devops/design/qa)"));
        for field in ["priority", "category", "effort", "risk", "summary", "team"] {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_prompt_placeholders_for_empty_body_and_labels() {
        let prompt = build_classification_prompt(&IssueSubject::new("Title only", ""));
        assert!(prompt.contains("Issue Description: No description provided"));
        assert!(prompt.contains("Current Labels: None"));
    }
}
