//! In-memory question bank shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::questions::models::{NewQuestion, Question, QuestionFilter, QuestionUpdate};

#[derive(Clone, Default)]
pub struct QuestionBank {
    questions: Arc<RwLock<Vec<Question>>>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(RwLock::new(questions)),
        }
    }

    /// The starter bank: three behavioral and six clinical fracture questions.
    pub fn seeded() -> Self {
        let seed = |id: &str, category: &str, subcategory: &str, text: &str, difficulty: u8| {
            Question {
                id: id.to_string(),
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                question_text: text.to_string(),
                difficulty,
            }
        };

        Self::new(vec![
            seed("q1", "behavioral", "general", "Tell me about yourself.", 1),
            seed("q2", "behavioral", "motivation", "Why orthopedics?", 2),
            seed(
                "q3",
                "behavioral",
                "future",
                "How do you view yourself as a practicing orthopedic surgeon?",
                2,
            ),
            seed(
                "q4",
                "clinical",
                "fractures",
                "Describe the Gustilo classification for open fractures.",
                3,
            ),
            seed(
                "q5",
                "clinical",
                "fractures",
                "How would you manage a mangled extremity?",
                4,
            ),
            seed(
                "q6",
                "clinical",
                "fractures",
                "Describe your surgical planning approach for a hip fracture.",
                3,
            ),
            seed(
                "q7",
                "clinical",
                "fractures",
                "What is your approach to a supracondylar fracture?",
                3,
            ),
            seed(
                "q8",
                "clinical",
                "fractures",
                "How would you manage a distal radius fracture?",
                2,
            ),
            seed(
                "q9",
                "clinical",
                "fractures",
                "Describe the classification and management of tibial plateau fractures.",
                4,
            ),
        ])
    }

    pub async fn list(&self, filter: &QuestionFilter) -> Vec<Question> {
        self.questions
            .read()
            .await
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Question> {
        self.questions
            .read()
            .await
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    /// Like `get`, but a missing id is a `NotFound` error.
    pub async fn require(&self, id: &str) -> Result<Question, AppError> {
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))
    }

    pub async fn create(&self, new: NewQuestion) -> Result<Question, AppError> {
        new.validate()?;

        let question = Question {
            id: Uuid::new_v4().to_string(),
            category: new.category.trim().to_string(),
            subcategory: new.subcategory.trim().to_string(),
            question_text: new.question_text.trim().to_string(),
            difficulty: new.difficulty,
        };

        self.questions.write().await.push(question.clone());
        info!("Question {} added ({})", question.id, question.category);
        Ok(question)
    }

    pub async fn update(&self, id: &str, update: QuestionUpdate) -> Result<Question, AppError> {
        update.validate()?;

        let mut questions = self.questions.write().await;
        let question = questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))?;

        update.apply_to(question);
        Ok(question.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.id != id);

        if questions.len() == before {
            return Err(AppError::NotFound(format!("Question {id} not found")));
        }
        info!("Question {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str) -> NewQuestion {
        NewQuestion {
            category: "clinical".to_string(),
            subcategory: "sports".to_string(),
            question_text: text.to_string(),
            difficulty: 3,
        }
    }

    #[tokio::test]
    async fn test_seeded_bank_has_nine_questions() {
        let bank = QuestionBank::seeded();
        let all = bank.list(&QuestionFilter::default()).await;
        assert_eq!(all.len(), 9);
        assert_eq!(all[0].id, "q1");
        assert_eq!(all[8].id, "q9");
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let bank = QuestionBank::seeded();
        let behavioral = bank
            .list(&QuestionFilter {
                category: Some("behavioral".to_string()),
                search: None,
            })
            .await;
        assert_eq!(behavioral.len(), 3);
        assert!(behavioral.iter().all(|q| q.category == "behavioral"));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let bank = QuestionBank::seeded();
        let created = bank
            .create(new_question("  How do you examine a suspected ACL tear?  "))
            .await
            .unwrap();
        assert_eq!(created.question_text, "How do you examine a suspected ACL tear?");

        let fetched = bank.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(bank.list(&QuestionFilter::default()).await.len(), 10);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_difficulty() {
        let bank = QuestionBank::default();
        let mut new = new_question("Valid text?");
        new.difficulty = 9;
        assert!(matches!(
            bank.create(new).await,
            Err(AppError::Validation(_))
        ));
        assert!(bank.list(&QuestionFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_existing_question() {
        let bank = QuestionBank::seeded();
        let updated = bank
            .update(
                "q2",
                QuestionUpdate {
                    difficulty: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.difficulty, 1);
        assert_eq!(bank.get("q2").await.unwrap().difficulty, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let bank = QuestionBank::seeded();
        let err = bank
            .update("nope", QuestionUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_question_once() {
        let bank = QuestionBank::seeded();
        bank.delete("q5").await.unwrap();
        assert!(bank.get("q5").await.is_none());
        assert!(matches!(
            bank.delete("q5").await,
            Err(AppError::NotFound(_))
        ));
    }
}
