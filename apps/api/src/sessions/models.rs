use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::models::FeedbackResult;
use crate::questions::models::Question;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub feedback_summary: Option<String>,
    pub content_score: Option<u32>,
    pub presentation_score: Option<u32>,
}

impl Session {
    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }
}

/// One question asked during a session, with the candidate's answer once given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionQuestion {
    pub id: String,
    pub session_id: String,
    pub question_id: String,
    pub user_response: Option<String>,
    pub feedback: Option<String>,
    pub content_score: Option<u32>,
    pub presentation_score: Option<u32>,
}

/// A session question joined with its bank entry. `question` is `None` when the
/// question was deleted from the bank after being asked.
#[derive(Debug, Clone, Serialize)]
pub struct SessionQuestionDetail {
    #[serde(flatten)]
    pub session_question: SessionQuestion,
    pub question: Option<Question>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndSessionRequest {
    pub feedback_summary: String,
    pub content_score: u32,
    pub presentation_score: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddQuestionRequest {
    pub question_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub session_question: SessionQuestion,
    pub feedback: FeedbackResult,
    pub follow_up_question: String,
}

/// Aggregate over a user's completed sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub completed_sessions: usize,
    pub average_content_score: Option<u32>,
    pub average_presentation_score: Option<u32>,
    /// Rounded mean of the two averages.
    pub overall_score: Option<u32>,
    pub latest_session: Option<DateTime<Utc>>,
}
