//! Axum route handlers for the Question Bank API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::questions::models::{NewQuestion, Question, QuestionFilter, QuestionUpdate};
use crate::state::AppState;

/// GET /api/v1/questions?category=&search=
pub async fn handle_list_questions(
    State(state): State<AppState>,
    Query(filter): Query<QuestionFilter>,
) -> Json<Vec<Question>> {
    Json(state.questions.list(&filter).await)
}

/// GET /api/v1/questions/:id
pub async fn handle_get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Question>, AppError> {
    Ok(Json(state.questions.require(&id).await?))
}

/// POST /api/v1/questions
pub async fn handle_create_question(
    State(state): State<AppState>,
    Json(request): Json<NewQuestion>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let question = state.questions.create(request).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// PATCH /api/v1/questions/:id
pub async fn handle_update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<QuestionUpdate>,
) -> Result<Json<Question>, AppError> {
    Ok(Json(state.questions.update(&id, request).await?))
}

/// DELETE /api/v1/questions/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.questions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
