use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option {index} duplicates an earlier option")]
    DuplicateOption { index: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotAnOption { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once built; the correct answer is always one of the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Builds a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are fewer than two
    /// options, an option is blank or repeated, or the answer is not an option.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        for (index, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption { index });
            }
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotAnOption {
                answer: correct_answer,
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Exact string comparison; no trimming or case folding.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer
    }
}

/// The built-in question bank shipped with the app.
///
/// # Panics
///
/// Panics if the bundled questions fail validation.
#[must_use]
pub fn sample_questions() -> Vec<Question> {
    let raw: [(u64, &str, [&str; 4], &str); 3] = [
        (1, "What is 2 + 2?", ["3", "4", "5", "6"], "4"),
        (
            2,
            "Capital of France?",
            ["London", "Berlin", "Paris", "Rome"],
            "Paris",
        ),
        (
            3,
            "React is a ___ library?",
            ["UI", "Database", "Backend", "OS"],
            "UI",
        ),
    ];

    raw.into_iter()
        .map(|(id, prompt, options, answer)| {
            Question::new(
                QuestionId::new(id),
                prompt,
                options.iter().map(ToString::to_string).collect(),
                answer,
            )
            .expect("bundled question should be valid")
        })
        .collect()
}
