//! In-memory interview session log.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::models::FeedbackResult;
use crate::sessions::models::{EndSessionRequest, Session, SessionQuestion, UserSummary};

#[derive(Default)]
struct SessionData {
    sessions: Vec<Session>,
    session_questions: Vec<SessionQuestion>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    data: Arc<RwLock<SessionData>>,
}

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".to_string())
}

fn session_question_not_found() -> AppError {
    AppError::NotFound("Session question not found".to_string())
}

fn validate_score(field: &str, score: u32) -> Result<(), AppError> {
    if score > 100 {
        return Err(AppError::Validation(format!(
            "{field} must be between 0 and 100, got {score}"
        )));
    }
    Ok(())
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_session(&self, user_id: &str) -> Result<Session, AppError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::Validation("user_id cannot be empty".to_string()));
        }

        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            start_time: Utc::now(),
            end_time: None,
            feedback_summary: None,
            content_score: None,
            presentation_score: None,
        };

        self.data.write().await.sessions.push(session.clone());
        info!("Session {} started for user {}", session.id, session.user_id);
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Session, AppError> {
        self.data
            .read()
            .await
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(session_not_found)
    }

    pub async fn end_session(
        &self,
        session_id: &str,
        request: EndSessionRequest,
    ) -> Result<Session, AppError> {
        validate_score("content_score", request.content_score)?;
        validate_score("presentation_score", request.presentation_score)?;

        let mut data = self.data.write().await;
        let session = data
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(session_not_found)?;

        session.end_time = Some(Utc::now());
        session.feedback_summary = Some(request.feedback_summary);
        session.content_score = Some(request.content_score);
        session.presentation_score = Some(request.presentation_score);

        info!("Session {session_id} ended");
        Ok(session.clone())
    }

    /// Records that `question_id` was asked in the session. The caller checks
    /// that the question exists in the bank.
    pub async fn add_question(
        &self,
        session_id: &str,
        question_id: &str,
    ) -> Result<SessionQuestion, AppError> {
        let mut data = self.data.write().await;
        if !data.sessions.iter().any(|s| s.id == session_id) {
            return Err(session_not_found());
        }

        let session_question = SessionQuestion {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            question_id: question_id.to_string(),
            user_response: None,
            feedback: None,
            content_score: None,
            presentation_score: None,
        };
        data.session_questions.push(session_question.clone());
        Ok(session_question)
    }

    pub async fn get_session_question(
        &self,
        session_question_id: &str,
    ) -> Result<SessionQuestion, AppError> {
        self.data
            .read()
            .await
            .session_questions
            .iter()
            .find(|sq| sq.id == session_question_id)
            .cloned()
            .ok_or_else(session_question_not_found)
    }

    pub async fn save_response(
        &self,
        session_question_id: &str,
        response: &str,
    ) -> Result<SessionQuestion, AppError> {
        self.modify_session_question(session_question_id, |sq| {
            sq.user_response = Some(response.to_string());
        })
        .await
    }

    pub async fn save_feedback(
        &self,
        session_question_id: &str,
        feedback: &FeedbackResult,
    ) -> Result<SessionQuestion, AppError> {
        self.modify_session_question(session_question_id, |sq| {
            sq.feedback = Some(feedback.feedback.clone());
            sq.content_score = Some(feedback.content_score);
            sq.presentation_score = Some(feedback.presentation_score);
        })
        .await
    }

    /// Questions asked in a session, in the order they were added.
    pub async fn session_questions(
        &self,
        session_id: &str,
    ) -> Result<Vec<SessionQuestion>, AppError> {
        let data = self.data.read().await;
        if !data.sessions.iter().any(|s| s.id == session_id) {
            return Err(session_not_found());
        }
        Ok(data
            .session_questions
            .iter()
            .filter(|sq| sq.session_id == session_id)
            .cloned()
            .collect())
    }

    /// All of a user's sessions, open or ended, newest first.
    pub async fn user_sessions(&self, user_id: &str) -> Vec<Session> {
        let data = self.data.read().await;
        // Reverse insertion order first so sessions started in the same instant
        // still come out newest first after the stable sort.
        let mut sessions: Vec<Session> = data
            .sessions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        sessions
    }

    /// Averages over the user's ended sessions that carry scores.
    pub async fn user_summary(&self, user_id: &str) -> UserSummary {
        let data = self.data.read().await;
        let completed: Vec<&Session> = data
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_complete())
            .collect();

        let average = |score: fn(&Session) -> Option<u32>| -> Option<u32> {
            let scores: Vec<u32> = completed.iter().filter_map(|&s| score(s)).collect();
            if scores.is_empty() {
                return None;
            }
            let sum: u32 = scores.iter().sum();
            Some((sum as f64 / scores.len() as f64).round() as u32)
        };

        let average_content_score = average(|s| s.content_score);
        let average_presentation_score = average(|s| s.presentation_score);
        let overall_score = match (average_content_score, average_presentation_score) {
            (Some(c), Some(p)) => Some(((c + p) as f64 / 2.0).round() as u32),
            _ => None,
        };

        UserSummary {
            user_id: user_id.to_string(),
            completed_sessions: completed.len(),
            average_content_score,
            average_presentation_score,
            overall_score,
            latest_session: completed.iter().filter_map(|s| s.end_time).max(),
        }
    }

    async fn modify_session_question<F>(
        &self,
        session_question_id: &str,
        modify: F,
    ) -> Result<SessionQuestion, AppError>
    where
        F: FnOnce(&mut SessionQuestion),
    {
        let mut data = self.data.write().await;
        let session_question = data
            .session_questions
            .iter_mut()
            .find(|sq| sq.id == session_question_id)
            .ok_or_else(session_question_not_found)?;
        modify(session_question);
        Ok(session_question.clone())
    }
}
