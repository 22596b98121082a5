//! Axum route handlers for the Sessions API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::sessions::interview::answer_question;
use crate::sessions::models::{
    AddQuestionRequest, AnswerRequest, AnswerResponse, CreateSessionRequest, EndSessionRequest,
    Session, SessionQuestion, SessionQuestionDetail, UserSummary,
};
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = state.sessions.create_session(&request.user_id).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.get_session(&session_id).await?))
}

/// POST /api/v1/sessions/:id/end
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<EndSessionRequest>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.end_session(&session_id, request).await?))
}

/// POST /api/v1/sessions/:id/questions
pub async fn handle_add_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddQuestionRequest>,
) -> Result<(StatusCode, Json<SessionQuestion>), AppError> {
    state.questions.require(&request.question_id).await?;
    let session_question = state
        .sessions
        .add_question(&session_id, &request.question_id)
        .await?;
    Ok((StatusCode::CREATED, Json(session_question)))
}

/// GET /api/v1/sessions/:id/questions
pub async fn handle_list_session_questions(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<SessionQuestionDetail>>, AppError> {
    let session_questions = state.sessions.session_questions(&session_id).await?;

    let mut details = Vec::with_capacity(session_questions.len());
    for session_question in session_questions {
        let question = state.questions.get(&session_question.question_id).await;
        details.push(SessionQuestionDetail {
            session_question,
            question,
        });
    }
    Ok(Json(details))
}

/// POST /api/v1/sessions/:id/questions/:sq_id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path((session_id, session_question_id)): Path<(String, String)>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let response = request.response.unwrap_or_default();
    let answer = answer_question(
        &state.sessions,
        &state.questions,
        state.feedback_engine.as_ref(),
        &session_id,
        &session_question_id,
        &response,
    )
    .await?;
    Ok(Json(answer))
}

/// GET /api/v1/users/:user_id/sessions
pub async fn handle_user_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Session>> {
    Json(state.sessions.user_sessions(&user_id).await)
}

/// GET /api/v1/users/:user_id/summary
pub async fn handle_user_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<UserSummary> {
    Json(state.sessions.user_summary(&user_id).await)
}
