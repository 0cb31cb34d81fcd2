use quiz_core::QuizResult;

/// Display values for the results screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub correct: u32,
    pub wrong: u32,
    pub accuracy_label: String,
}

impl From<QuizResult> for ResultVm {
    fn from(result: QuizResult) -> Self {
        Self {
            correct: result.correct(),
            wrong: result.wrong(),
            accuracy_label: format!("{}%", result.accuracy_label()),
        }
    }
}
