use std::sync::Arc;

use crate::feedback::engine::FeedbackEngine;
use crate::questions::store::QuestionBank;
use crate::sessions::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable feedback engine. Default: heuristic. Swap via FEEDBACK_BACKEND.
    pub feedback_engine: Arc<dyn FeedbackEngine>,
    pub questions: QuestionBank,
    pub sessions: SessionStore,
}

impl AppState {
    /// State with the seeded question bank and an empty session log.
    pub fn new(feedback_engine: Arc<dyn FeedbackEngine>) -> Self {
        Self {
            feedback_engine,
            questions: QuestionBank::seeded(),
            sessions: SessionStore::new(),
        }
    }
}
