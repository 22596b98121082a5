//! Feedback engines: pluggable, trait-based evaluators of interview answers.
//!
//! Default: `HeuristicFeedbackEngine` (pure-Rust, deterministic, never fails).
//! Optional: `RemoteFeedbackEngine` (chat-completion API), wrapped in a
//! `FallbackFeedbackEngine` so a failed remote call degrades to the heuristic.
//!
//! `AppState` holds an `Arc<dyn FeedbackEngine>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::{Config, FeedbackBackend};
use crate::errors::AppError;
use crate::feedback::follow_up::follow_up_question;
use crate::feedback::heuristic::score_response;
use crate::feedback::knowledge::KnowledgeBase;
use crate::feedback::models::FeedbackResult;
use crate::feedback::prompts::{
    render, FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM, FOLLOW_UP_PROMPT_TEMPLATE,
    FOLLOW_UP_SYSTEM,
};
use crate::llm_client::prompts::{COACH_PERSONA, JSON_ONLY_SYSTEM};
use crate::llm_client::{parse_json_reply, LlmClient, LlmError};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap evaluation backends without touching handlers.
#[async_trait]
pub trait FeedbackEngine: Send + Sync {
    async fn evaluate(&self, question: &str, response: &str) -> Result<FeedbackResult, AppError>;

    async fn follow_up(&self, question: &str, response: &str) -> Result<String, AppError>;

    /// Short backend label for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicFeedbackEngine
// ────────────────────────────────────────────────────────────────────────────

/// Keyword and text-structure scorer over an injected knowledge base.
pub struct HeuristicFeedbackEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl HeuristicFeedbackEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl FeedbackEngine for HeuristicFeedbackEngine {
    async fn evaluate(&self, question: &str, response: &str) -> Result<FeedbackResult, AppError> {
        Ok(score_response(&self.knowledge, question, response))
    }

    async fn follow_up(&self, question: &str, response: &str) -> Result<String, AppError> {
        Ok(follow_up_question(question, response))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteFeedbackEngine
// ────────────────────────────────────────────────────────────────────────────

/// Delegates evaluation to a chat-completion model.
pub struct RemoteFeedbackEngine(pub LlmClient);

#[async_trait]
impl FeedbackEngine for RemoteFeedbackEngine {
    async fn evaluate(&self, question: &str, response: &str) -> Result<FeedbackResult, AppError> {
        let system = format!("{COACH_PERSONA}\n\n{FEEDBACK_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");
        let prompt = render(FEEDBACK_PROMPT_TEMPLATE, question, response);
        let reply = self.0.call_text(&prompt, &system).await?;
        Ok(parse_remote_feedback(&reply)?)
    }

    async fn follow_up(&self, question: &str, response: &str) -> Result<String, AppError> {
        let system = format!("{COACH_PERSONA}\n\n{FOLLOW_UP_SYSTEM}");
        let prompt = render(FOLLOW_UP_PROMPT_TEMPLATE, question, response);
        Ok(self.0.call_text(&prompt, &system).await?)
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

/// Model reply shape. Every field is optional; the model is not trusted to
/// return all of them or to keep scores in range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteFeedbackPayload {
    feedback: Option<String>,
    content_score: Option<f64>,
    presentation_score: Option<f64>,
    strengths: Option<Vec<String>>,
    improvements: Option<Vec<String>>,
}

const MISSING_FEEDBACK: &str = "Feedback not available";
const MISSING_SCORE: u32 = 50;

/// Converts a model reply into a `FeedbackResult`, filling gaps with defaults.
/// Fails only when the reply is not a JSON object of the expected shape.
fn parse_remote_feedback(reply: &str) -> Result<FeedbackResult, LlmError> {
    let payload: RemoteFeedbackPayload = parse_json_reply(reply)?;

    Ok(FeedbackResult {
        feedback: payload
            .feedback
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| MISSING_FEEDBACK.to_string()),
        content_score: clamp_score(payload.content_score),
        presentation_score: clamp_score(payload.presentation_score),
        strengths: payload.strengths.unwrap_or_default(),
        improvements: payload.improvements.unwrap_or_default(),
    })
}

fn clamp_score(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u32,
        _ => MISSING_SCORE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackFeedbackEngine
// ────────────────────────────────────────────────────────────────────────────

/// Tries `primary`; on any error logs it and answers from `fallback` instead.
pub struct FallbackFeedbackEngine {
    primary: Arc<dyn FeedbackEngine>,
    fallback: Arc<dyn FeedbackEngine>,
}

impl FallbackFeedbackEngine {
    pub fn new(primary: Arc<dyn FeedbackEngine>, fallback: Arc<dyn FeedbackEngine>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl FeedbackEngine for FallbackFeedbackEngine {
    async fn evaluate(&self, question: &str, response: &str) -> Result<FeedbackResult, AppError> {
        match self.primary.evaluate(question, response).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(
                    "{} feedback failed, falling back to {}: {e}",
                    self.primary.backend(),
                    self.fallback.backend()
                );
                self.fallback.evaluate(question, response).await
            }
        }
    }

    async fn follow_up(&self, question: &str, response: &str) -> Result<String, AppError> {
        match self.primary.follow_up(question, response).await {
            Ok(follow_up) => Ok(follow_up),
            Err(e) => {
                warn!(
                    "{} follow-up failed, falling back to {}: {e}",
                    self.primary.backend(),
                    self.fallback.backend()
                );
                self.fallback.follow_up(question, response).await
            }
        }
    }

    fn backend(&self) -> &'static str {
        self.primary.backend()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Startup wiring
// ────────────────────────────────────────────────────────────────────────────

/// Builds the engine chain selected by `FEEDBACK_BACKEND`.
pub fn build_feedback_engine(
    config: &Config,
    knowledge: Arc<KnowledgeBase>,
) -> Result<Arc<dyn FeedbackEngine>, LlmError> {
    let heuristic: Arc<dyn FeedbackEngine> = Arc::new(HeuristicFeedbackEngine::new(knowledge));

    match config.feedback_backend {
        FeedbackBackend::Heuristic => Ok(heuristic),
        FeedbackBackend::Remote => {
            let client = LlmClient::new(
                config.openai_api_url.clone(),
                config.openai_api_key.clone(),
            )?;
            Ok(Arc::new(FallbackFeedbackEngine::new(
                Arc::new(RemoteFeedbackEngine(client)),
                heuristic,
            )))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::follow_up::GENERIC_FOLLOW_UP;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always fails, counting how often it was asked.
    struct FailingEngine {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedbackEngine for FailingEngine {
        async fn evaluate(&self, _q: &str, _r: &str) -> Result<FeedbackResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Llm(LlmError::EmptyContent))
        }

        async fn follow_up(&self, _q: &str, _r: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Llm(LlmError::MissingApiKey))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    /// Always returns the same canned answer.
    struct CannedEngine;

    #[async_trait]
    impl FeedbackEngine for CannedEngine {
        async fn evaluate(&self, _q: &str, _r: &str) -> Result<FeedbackResult, AppError> {
            Ok(FeedbackResult {
                feedback: "canned".to_string(),
                content_score: 99,
                presentation_score: 98,
                strengths: vec![],
                improvements: vec![],
            })
        }

        async fn follow_up(&self, _q: &str, _r: &str) -> Result<String, AppError> {
            Ok("canned follow-up".to_string())
        }

        fn backend(&self) -> &'static str {
            "canned"
        }
    }

    fn heuristic() -> Arc<dyn FeedbackEngine> {
        Arc::new(HeuristicFeedbackEngine::new(Arc::new(KnowledgeBase::reference())))
    }

    #[tokio::test]
    async fn test_heuristic_engine_scores_gustilo_answer() {
        let engine = heuristic();
        let result = engine
            .evaluate(
                "Describe the Gustilo classification for open fractures.",
                "Type I: wound ≤1 cm, minimal contamination",
            )
            .await
            .unwrap();
        assert_eq!(result.content_score, 20);
        assert_eq!(engine.backend(), "heuristic");
    }

    #[tokio::test]
    async fn test_heuristic_engine_uses_injected_knowledge() {
        let kb = KnowledgeBase::from_json_str(
            r#"{"topics": [{"label": "scaphoid", "keywords": ["snuffbox"]}]}"#,
        )
        .unwrap();
        let engine = HeuristicFeedbackEngine::new(Arc::new(kb));
        let result = engine
            .evaluate("Scaphoid fracture workup?", "Check for snuffbox tenderness first.")
            .await
            .unwrap();
        assert_eq!(result.content_score, 100);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_fails() {
        let failing = Arc::new(FailingEngine {
            calls: AtomicUsize::new(0),
        });
        let engine = FallbackFeedbackEngine::new(failing.clone(), heuristic());

        let result = engine
            .evaluate("Tell me about yourself.", "too short")
            .await
            .unwrap();
        assert_eq!(result.content_score, 0);

        let follow_up = engine.follow_up("Unmatched?", "").await.unwrap();
        assert_eq!(follow_up, GENERIC_FOLLOW_UP);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fallback_not_consulted_when_primary_succeeds() {
        let failing = Arc::new(FailingEngine {
            calls: AtomicUsize::new(0),
        });
        let engine = FallbackFeedbackEngine::new(Arc::new(CannedEngine), failing.clone());

        let result = engine.evaluate("q", "r").await.unwrap();
        assert_eq!(result.feedback, "canned");
        assert_eq!(engine.follow_up("q", "r").await.unwrap(), "canned follow-up");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
        assert_eq!(engine.backend(), "canned");
    }

    #[tokio::test]
    async fn test_error_propagates_when_both_fail() {
        let engine = FallbackFeedbackEngine::new(
            Arc::new(FailingEngine {
                calls: AtomicUsize::new(0),
            }),
            Arc::new(FailingEngine {
                calls: AtomicUsize::new(0),
            }),
        );
        assert!(engine.evaluate("q", "r").await.is_err());
    }

    #[tokio::test]
    async fn test_remote_without_key_falls_back_to_heuristic() {
        let client = LlmClient::new("http://127.0.0.1:9/unused".to_string(), None).unwrap();
        let engine =
            FallbackFeedbackEngine::new(Arc::new(RemoteFeedbackEngine(client)), heuristic());
        let follow_up = engine
            .follow_up("Tell me about yourself.", "I am a student.")
            .await
            .unwrap();
        assert_eq!(
            follow_up,
            "What specific experiences shaped your interest in orthopedic surgery?"
        );
    }

    #[test]
    fn test_build_engine_defaults_to_heuristic() {
        let engine =
            build_feedback_engine(&Config::default(), Arc::new(KnowledgeBase::reference()))
                .unwrap();
        assert_eq!(engine.backend(), "heuristic");
    }

    #[test]
    fn test_build_engine_remote_reports_remote_backend() {
        let config = Config {
            feedback_backend: FeedbackBackend::Remote,
            openai_api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let engine = build_feedback_engine(&config, Arc::new(KnowledgeBase::reference())).unwrap();
        assert_eq!(engine.backend(), "remote");
    }

    #[test]
    fn test_parse_remote_feedback_full_payload() {
        let reply = r#"{
            "feedback": "Solid answer.",
            "contentScore": 72,
            "presentationScore": 64.6,
            "strengths": ["Accurate grading"],
            "improvements": ["Mention antibiotics", "Discuss timing"]
        }"#;
        let result = parse_remote_feedback(reply).unwrap();
        assert_eq!(result.feedback, "Solid answer.");
        assert_eq!(result.content_score, 72);
        assert_eq!(result.presentation_score, 65);
        assert_eq!(result.strengths.len(), 1);
        assert_eq!(result.improvements.len(), 2);
    }

    #[test]
    fn test_parse_remote_feedback_fills_defaults() {
        let result = parse_remote_feedback("```json\n{}\n```").unwrap();
        assert_eq!(result.feedback, MISSING_FEEDBACK);
        assert_eq!(result.content_score, 50);
        assert_eq!(result.presentation_score, 50);
        assert!(result.strengths.is_empty());
        assert!(result.improvements.is_empty());
    }

    #[test]
    fn test_parse_remote_feedback_clamps_scores() {
        let result =
            parse_remote_feedback(r#"{"contentScore": 140, "presentationScore": -3}"#).unwrap();
        assert_eq!(result.content_score, 100);
        assert_eq!(result.presentation_score, 0);
    }

    #[test]
    fn test_parse_remote_feedback_rejects_prose() {
        let err = parse_remote_feedback("Great answer, 8/10!").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }
}
