//! Keyword knowledge base: clinical topics and the phrases a strong answer should mention.
//!
//! Built once at startup (reference table or a JSON override) and shared
//! read-only behind an `Arc`. Never mutated after construction.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// A clinical topic and the keywords expected in an answer about it.
///
/// `label` is matched as a case-insensitive substring of the question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordTopic {
    pub label: String,
    pub keywords: Vec<String>,
}

impl KeywordTopic {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnowledgeBase {
    pub topics: Vec<KeywordTopic>,
}

impl KnowledgeBase {
    pub fn new(topics: Vec<KeywordTopic>) -> Self {
        Self { topics }
    }

    /// The built-in orthopedic fracture table.
    pub fn reference() -> Self {
        Self::new(vec![
            KeywordTopic::new(
                "Gustilo classification",
                &[
                    "Type I: wound ≤1 cm, minimal contamination",
                    "Type II: wound 1-10 cm, moderate soft tissue damage",
                    "Type IIIA: adequate soft tissue coverage",
                    "Type IIIB: extensive soft tissue loss with periosteal stripping",
                    "Type IIIC: arterial injury requiring repair",
                ],
            ),
            KeywordTopic::new(
                "mangled extremity",
                &[
                    "ATLS",
                    "MESS score",
                    "vascular",
                    "debridement",
                    "external fixation",
                    "limb salvage",
                    "amputation",
                ],
            ),
            KeywordTopic::new(
                "hip fracture",
                &[
                    "Garden classification",
                    "femoral neck",
                    "intertrochanteric",
                    "hemiarthroplasty",
                    "total hip arthroplasty",
                    "cephalomedullary nail",
                    "within 48 hours",
                ],
            ),
            KeywordTopic::new(
                "supracondylar fracture",
                &[
                    "Gartland classification",
                    "neurovascular",
                    "brachial artery",
                    "anterior interosseous nerve",
                    "closed reduction",
                    "percutaneous pinning",
                    "compartment syndrome",
                ],
            ),
            KeywordTopic::new(
                "radius fracture",
                &[
                    "Colles",
                    "radial height",
                    "radial inclination",
                    "volar tilt",
                    "closed reduction",
                    "casting",
                    "volar locking plate",
                ],
            ),
            KeywordTopic::new(
                "tibial plateau fracture",
                &[
                    "Schatzker classification",
                    "CT scan",
                    "compartment syndrome",
                    "articular surface",
                    "buttress plate",
                    "bone graft",
                    "external fixation",
                ],
            ),
        ])
    }

    /// Parses a table of the form `{"topics": [{"label": "...", "keywords": ["..."]}]}`.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let kb: KnowledgeBase =
            serde_json::from_str(raw).context("knowledge base is not valid JSON")?;
        if let Some(idx) = kb.topics.iter().position(|t| t.label.trim().is_empty()) {
            bail!("knowledge base topic #{idx} has an empty label");
        }
        Ok(kb)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read knowledge base {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Topics whose label occurs in `question` (case-insensitive), in table order.
    pub fn matching_topics<'a>(&'a self, question: &str) -> impl Iterator<Item = &'a KeywordTopic> {
        let question = question.to_lowercase();
        self.topics
            .iter()
            .filter(move |t| question.contains(&t.label.to_lowercase()))
    }
}
