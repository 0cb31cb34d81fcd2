use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError, QuestionId, TestType};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
}

/// Persisted shape for a question, including its place in the bank.
///
/// Keeps ordering and test-type bookkeeping out of the domain `Question`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub test_type: TestType,
    pub position: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(test_type: TestType, position: u32, question: &Question) -> Self {
        Self {
            id: question.id(),
            test_type,
            position,
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            correct_answer: question.correct_answer().to_owned(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the stored row no longer validates.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.id, self.prompt, self.options, self.correct_answer)
    }
}

/// Source of the ordered question list for each test type.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or update a question at the given position of a bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(
        &self,
        test_type: TestType,
        position: u32,
        question: &Question,
    ) -> Result<(), StorageError>;

    /// All questions of a bank, ordered by position then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or rows that fail validation.
    async fn list_questions(&self, test_type: TestType) -> Result<Vec<Question>, StorageError>;

    /// Number of questions in a bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_questions(&self, test_type: TestType) -> Result<u32, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<HashMap<(TestType, QuestionId), QuestionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(
        &self,
        test_type: TestType,
        position: u32,
        question: &Question,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            (test_type, question.id()),
            QuestionRecord::from_question(test_type, position, question),
        );
        Ok(())
    }

    async fn list_questions(&self, test_type: TestType) -> Result<Vec<Question>, StorageError> {
        let mut records: Vec<QuestionRecord> = {
            let guard = self
                .questions
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard
                .values()
                .filter(|record| record.test_type == test_type)
                .cloned()
                .collect()
        };
        records.sort_by_key(|record| (record.position, record.id));

        let mut questions = Vec::with_capacity(records.len());
        for record in records {
            questions.push(record.into_question()?);
        }
        Ok(questions)
    }

    async fn count_questions(&self, test_type: TestType) -> Result<u32, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let count = guard.keys().filter(|(kind, _)| *kind == test_type).count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}
