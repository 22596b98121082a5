// Interview Sessions
// In-memory session log, the answer → feedback → follow-up turn, and per-user summaries.

pub mod handlers;
pub mod interview;
pub mod models;
pub mod store;
