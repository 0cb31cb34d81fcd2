use thiserror::Error;

use crate::model::{QuestionError, QuizSettingsError, UnsupportedTestType};
use crate::session::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    TestType(#[from] UnsupportedTestType),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
