//! Axum route handlers for the Feedback API.

use axum::{extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::feedback::models::{EvaluateRequest, FeedbackResult, FollowUpResponse};
use crate::state::AppState;

/// POST /api/v1/feedback
///
/// Scores an answer. Missing or null fields are evaluated as empty strings,
/// which yields the "too brief" result rather than an error.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<FeedbackResult>, AppError> {
    let result = state
        .feedback_engine
        .evaluate(request.question(), request.response())
        .await?;

    debug!(
        "Feedback scored: content={}, presentation={}",
        result.content_score, result.presentation_score
    );

    Ok(Json(result))
}

/// POST /api/v1/feedback/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<FollowUpResponse>, AppError> {
    let follow_up_question = state
        .feedback_engine
        .follow_up(request.question(), request.response())
        .await?;

    Ok(Json(FollowUpResponse { follow_up_question }))
}
