//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;
use quiz_core::model::{TestType, UnsupportedTestType};
use storage::repository::StorageError;

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no questions available for the {0} test")]
    Empty(TestType),
    #[error("quiz state is unavailable after a panic")]
    Poisoned,
    #[error(transparent)]
    TestType(#[from] UnsupportedTestType),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// True for the "choose an option" prompt, which the user recovers from.
    #[must_use]
    pub fn is_no_selection(&self) -> bool {
        matches!(self, QuizServiceError::Quiz(QuizError::NoSelection))
    }
}
