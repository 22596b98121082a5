use serde::{Deserialize, Serialize};

/// Evaluation of one candidate answer. Scores are always within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub feedback: String,
    pub content_score: u32,
    pub presentation_score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// Request body shared by the feedback and follow-up endpoints.
/// Absent fields are treated as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl EvaluateRequest {
    pub fn question(&self) -> &str {
        self.question.as_deref().unwrap_or_default()
    }

    pub fn response(&self) -> &str {
        self.response.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpResponse {
    pub follow_up_question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_result_serializes_camel_case() {
        let result = FeedbackResult {
            feedback: "ok".to_string(),
            content_score: 20,
            presentation_score: 30,
            strengths: vec![],
            improvements: vec!["more".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["contentScore"], 20);
        assert_eq!(value["presentationScore"], 30);
        assert!(value.get("content_score").is_none());
    }

    #[test]
    fn test_null_and_missing_fields_become_empty() {
        let req: EvaluateRequest =
            serde_json::from_str(r#"{"question": null}"#).unwrap();
        assert_eq!(req.question(), "");
        assert_eq!(req.response(), "");
    }
}
