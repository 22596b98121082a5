// Feedback Engine
// Implements: keyword knowledge base, heuristic scoring, follow-up selection,
// and the pluggable engine chain (heuristic / remote with fallback).
// All LLM calls go through llm_client, no direct HTTP calls here.

pub mod engine;
pub mod follow_up;
pub mod handlers;
pub mod heuristic;
pub mod knowledge;
pub mod models;
pub mod prompts;
