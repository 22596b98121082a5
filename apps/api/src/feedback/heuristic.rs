//! Heuristic answer scoring: keyword coverage for content, text shape for presentation.
//!
//! Pure and deterministic: the same (knowledge base, question, response) always
//! yields the same `FeedbackResult`. No I/O, no clock, no randomness.
//!
//! Algorithm:
//! 1. Responses shorter than 10 trimmed characters short-circuit to a zero score.
//! 2. Content: every topic whose label appears in the question contributes its
//!    keywords; score = round(100 × hits / (hits + misses)). With no matched
//!    keywords the score falls back to min(100, round(length / 10)).
//! 3. Presentation: additive points for sentence length, sentence count,
//!    paragraph breaks and overall length (max 100).
//! 4. Strengths, improvements and the feedback sentence are rule-based.

use crate::feedback::knowledge::KnowledgeBase;
use crate::feedback::models::FeedbackResult;

/// Responses with fewer trimmed characters than this are not scored.
pub const MIN_RESPONSE_CHARS: usize = 10;

/// How many keywords a strength/improvement line cites before truncating.
const MAX_CITED_KEYWORDS: usize = 3;

pub const TOO_BRIEF_FEEDBACK: &str =
    "Your response is too brief to evaluate. Please provide a more detailed answer.";
pub const TOO_BRIEF_IMPROVEMENT: &str = "Provide a more detailed answer";

const STRUCTURE_STRENGTH: &str = "Your answer was well structured across several distinct points";
const EXPAND_IMPROVEMENT: &str = "Expand your answer with more supporting detail and examples";
const CONCISE_IMPROVEMENT: &str = "Work on conciseness by breaking long sentences into shorter ones";

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Scores a candidate `response` to an interview `question`.
pub fn score_response(kb: &KnowledgeBase, question: &str, response: &str) -> FeedbackResult {
    if response.trim().chars().count() < MIN_RESPONSE_CHARS {
        return too_brief();
    }

    let coverage = KeywordCoverage::measure(kb, question, response);
    let structure = TextStructure::analyze(response);

    let content_score = coverage
        .score()
        .unwrap_or_else(|| length_proxy_score(structure.char_count));
    let presentation_score = structure.presentation_score();

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if !coverage.hits.is_empty() {
        strengths.push(format!(
            "You covered key concepts: {}",
            cite_keywords(&coverage.hits)
        ));
    }
    if structure.sentence_count > 3 {
        strengths.push(STRUCTURE_STRENGTH.to_string());
    }

    if !coverage.misses.is_empty() {
        improvements.push(format!(
            "Consider discussing: {}",
            cite_keywords(&coverage.misses)
        ));
    }
    if structure.sentence_count < 3 {
        improvements.push(EXPAND_IMPROVEMENT.to_string());
    }
    if structure.avg_sentence_len > 30.0 {
        improvements.push(CONCISE_IMPROVEMENT.to_string());
    }

    FeedbackResult {
        feedback: compose_feedback(content_score, presentation_score),
        content_score,
        presentation_score,
        strengths,
        improvements,
    }
}

fn too_brief() -> FeedbackResult {
    FeedbackResult {
        feedback: TOO_BRIEF_FEEDBACK.to_string(),
        content_score: 0,
        presentation_score: 0,
        strengths: vec![],
        improvements: vec![TOO_BRIEF_IMPROVEMENT.to_string()],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

/// Keywords of every matched topic, split by whether the response mentions them.
/// Both lists keep the table's spelling and order.
#[derive(Debug, Default, PartialEq)]
struct KeywordCoverage<'a> {
    hits: Vec<&'a str>,
    misses: Vec<&'a str>,
}

impl<'a> KeywordCoverage<'a> {
    fn measure(kb: &'a KnowledgeBase, question: &str, response: &str) -> Self {
        let response = response.to_lowercase();
        let mut coverage = KeywordCoverage::default();

        for topic in kb.matching_topics(question) {
            for keyword in &topic.keywords {
                if response.contains(&keyword.to_lowercase()) {
                    coverage.hits.push(keyword.as_str());
                } else {
                    coverage.misses.push(keyword.as_str());
                }
            }
        }
        coverage
    }

    /// `None` when no keyword was checked at all (no topic matched).
    fn score(&self) -> Option<u32> {
        let total = self.hits.len() + self.misses.len();
        if total == 0 {
            return None;
        }
        Some((100.0 * self.hits.len() as f64 / total as f64).round() as u32)
    }
}

/// Content score for questions without a keyword list: one point per ten characters.
fn length_proxy_score(char_count: usize) -> u32 {
    ((char_count as f64 / 10.0).round() as u32).min(100)
}

fn cite_keywords(keywords: &[&str]) -> String {
    let cited = keywords
        .iter()
        .take(MAX_CITED_KEYWORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if keywords.len() > MAX_CITED_KEYWORDS {
        format!("{cited}…")
    } else {
        cited
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Presentation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct TextStructure {
    char_count: usize,
    sentence_count: usize,
    /// Characters per sentence, not words.
    avg_sentence_len: f64,
    has_paragraph_break: bool,
}

impl TextStructure {
    fn analyze(response: &str) -> Self {
        let char_count = response.chars().count();
        let sentence_count = response
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();
        let avg_sentence_len = char_count as f64 / sentence_count.max(1) as f64;
        let has_paragraph_break = response.replace("\r\n", "\n").contains("\n\n");

        Self {
            char_count,
            sentence_count,
            avg_sentence_len,
            has_paragraph_break,
        }
    }

    fn presentation_score(&self) -> u32 {
        let mut score = 0;
        if self.avg_sentence_len > 5.0 && self.avg_sentence_len < 30.0 {
            score += 30;
        }
        if self.sentence_count > 3 {
            score += 30;
        }
        if self.has_paragraph_break {
            score += 20;
        }
        if self.char_count > 100 && self.char_count < 1000 {
            score += 20;
        }
        score
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback sentence
// ────────────────────────────────────────────────────────────────────────────

fn compose_feedback(content_score: u32, presentation_score: u32) -> String {
    format!(
        "{} {}",
        content_phrase(content_score),
        presentation_phrase(presentation_score)
    )
}

fn content_phrase(score: u32) -> &'static str {
    if score >= 80 {
        "Excellent answer that covers the key concepts thoroughly."
    } else if score >= 60 {
        "Good answer that addresses most of the important points."
    } else if score >= 40 {
        "Adequate answer, but you missed several key concepts."
    } else {
        "Your answer is missing many of the key concepts expected for this question."
    }
}

fn presentation_phrase(score: u32) -> &'static str {
    if score >= 80 {
        "Your presentation was clear and well organized."
    } else if score >= 60 {
        "Your presentation was generally clear, though the structure could be tighter."
    } else if score >= 40 {
        "Your presentation needs improvement in terms of structure and clarity."
    } else {
        "Focus on organizing your answer into clear, well-paced sentences and paragraphs."
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
