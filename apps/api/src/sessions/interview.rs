//! Interview turn: answer a session question and get coached.
//!
//! Flow: locate session question → look up question text → evaluate →
//!       follow-up → save response and feedback → return both.
//!
//! Nothing is written until the engine has answered, so a failed evaluation
//! leaves the session question untouched.

use tracing::info;

use crate::errors::AppError;
use crate::feedback::engine::FeedbackEngine;
use crate::questions::store::QuestionBank;
use crate::sessions::models::AnswerResponse;
use crate::sessions::store::SessionStore;

pub async fn answer_question(
    sessions: &SessionStore,
    questions: &QuestionBank,
    engine: &dyn FeedbackEngine,
    session_id: &str,
    session_question_id: &str,
    response: &str,
) -> Result<AnswerResponse, AppError> {
    let session_question = sessions.get_session_question(session_question_id).await?;
    if session_question.session_id != session_id {
        return Err(AppError::NotFound(
            "Session question not found".to_string(),
        ));
    }

    let question = questions.require(&session_question.question_id).await?;

    let feedback = engine.evaluate(&question.question_text, response).await?;
    let follow_up_question = engine.follow_up(&question.question_text, response).await?;

    sessions
        .save_response(session_question_id, response)
        .await?;
    let session_question = sessions
        .save_feedback(session_question_id, &feedback)
        .await?;

    info!(
        "Session {session_id}: question {} scored content={} presentation={} via {}",
        question.id,
        feedback.content_score,
        feedback.presentation_score,
        engine.backend()
    );

    Ok(AnswerResponse {
        session_question,
        feedback,
        follow_up_question,
    })
}
