pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::questions::handlers as questions;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback API
        .route("/api/v1/feedback", post(feedback::handle_evaluate))
        .route("/api/v1/feedback/follow-up", post(feedback::handle_follow_up))
        // Question Bank API
        .route(
            "/api/v1/questions",
            get(questions::handle_list_questions).post(questions::handle_create_question),
        )
        .route(
            "/api/v1/questions/:id",
            get(questions::handle_get_question)
                .patch(questions::handle_update_question)
                .delete(questions::handle_delete_question),
        )
        // Sessions API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .route("/api/v1/sessions/:id/end", post(sessions::handle_end_session))
        .route(
            "/api/v1/sessions/:id/questions",
            get(sessions::handle_list_session_questions).post(sessions::handle_add_question),
        )
        .route(
            "/api/v1/sessions/:id/questions/:sq_id/answer",
            post(sessions::handle_answer),
        )
        .route(
            "/api/v1/users/:user_id/sessions",
            get(sessions::handle_user_sessions),
        )
        .route(
            "/api/v1/users/:user_id/summary",
            get(sessions::handle_user_summary),
        )
        .with_state(state)
}
