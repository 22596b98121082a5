use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// "behavioral" or "clinical" in the seeded bank; free-form otherwise.
    pub category: String,
    pub subcategory: String,
    pub question_text: String,
    /// 1 (easiest) to 5.
    pub difficulty: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub question_text: String,
    pub difficulty: u8,
}

impl NewQuestion {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("category", &self.category)?;
        require_non_blank("question_text", &self.question_text)?;
        validate_difficulty(self.difficulty)
    }
}

/// Partial update: only fields that are present are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionUpdate {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub question_text: Option<String>,
    pub difficulty: Option<u8>,
}

impl QuestionUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(category) = &self.category {
            require_non_blank("category", category)?;
        }
        if let Some(text) = &self.question_text {
            require_non_blank("question_text", text)?;
        }
        if let Some(difficulty) = self.difficulty {
            validate_difficulty(difficulty)?;
        }
        Ok(())
    }

    pub fn apply_to(self, question: &mut Question) {
        if let Some(category) = self.category {
            question.category = category.trim().to_string();
        }
        if let Some(subcategory) = self.subcategory {
            question.subcategory = subcategory.trim().to_string();
        }
        if let Some(text) = self.question_text {
            question.question_text = text.trim().to_string();
        }
        if let Some(difficulty) = self.difficulty {
            question.difficulty = difficulty;
        }
    }
}

/// Query string for listing questions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    /// Exact category match; "all" or absent means no filter.
    pub category: Option<String>,
    /// Case-insensitive substring over text, category and subcategory.
    pub search: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(category) => question.category == category,
        };

        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(search) => {
                let needle = search.to_lowercase();
                question.question_text.to_lowercase().contains(&needle)
                    || question.category.to_lowercase().contains(&needle)
                    || question.subcategory.to_lowercase().contains(&needle)
            }
        };

        category_ok && search_ok
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn validate_difficulty(difficulty: u8) -> Result<(), AppError> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(AppError::Validation(format!(
            "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {difficulty}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: "q8".to_string(),
            category: "clinical".to_string(),
            subcategory: "fractures".to_string(),
            question_text: "How would you manage a distal radius fracture?".to_string(),
            difficulty: 2,
        }
    }

    #[test]
    fn test_new_question_rejects_blank_text() {
        let new = NewQuestion {
            category: "clinical".to_string(),
            subcategory: String::new(),
            question_text: "   ".to_string(),
            difficulty: 3,
        };
        assert!(matches!(new.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_difficulty_bounds() {
        assert!(validate_difficulty(1).is_ok());
        assert!(validate_difficulty(5).is_ok());
        assert!(validate_difficulty(0).is_err());
        assert!(validate_difficulty(6).is_err());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut q = question();
        QuestionUpdate {
            difficulty: Some(4),
            question_text: Some("  Manage a Colles fracture.  ".to_string()),
            ..Default::default()
        }
        .apply_to(&mut q);
        assert_eq!(q.difficulty, 4);
        assert_eq!(q.question_text, "Manage a Colles fracture.");
        assert_eq!(q.category, "clinical");
    }

    #[test]
    fn test_filter_by_category_and_all() {
        let q = question();
        let clinical = QuestionFilter {
            category: Some("clinical".to_string()),
            search: None,
        };
        let behavioral = QuestionFilter {
            category: Some("behavioral".to_string()),
            search: None,
        };
        let all = QuestionFilter {
            category: Some("all".to_string()),
            search: None,
        };
        assert!(clinical.matches(&q));
        assert!(!behavioral.matches(&q));
        assert!(all.matches(&q));
    }

    #[test]
    fn test_search_covers_text_and_subcategory() {
        let q = question();
        let by_text = QuestionFilter {
            category: None,
            search: Some("RADIUS".to_string()),
        };
        let by_sub = QuestionFilter {
            category: None,
            search: Some("fract".to_string()),
        };
        let miss = QuestionFilter {
            category: None,
            search: Some("yourself".to_string()),
        };
        assert!(by_text.matches(&q));
        assert!(by_sub.matches(&q));
        assert!(!miss.matches(&q));
    }
}
