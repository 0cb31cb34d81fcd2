use chrono::{DateTime, Utc};
use quiz_core::model::TestType;
use quiz_core::{FinishReason, QuizResult, QuizSession, TickCue};

/// How a quiz ended, handed to whoever shows the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub test_type: TestType,
    pub score: u32,
    pub total: u32,
    pub reason: FinishReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl QuizOutcome {
    #[must_use]
    pub fn result(&self) -> QuizResult {
        QuizResult::new(self.score, self.total)
    }
}

/// Read-only copy of the quiz state, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub test_type: TestType,
    /// 1-based position of the current question.
    pub question_number: usize,
    pub total: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub submitted: bool,
    pub last_answer_correct: Option<bool>,
    pub score: u32,
    pub remaining_secs: u32,
    pub progress: f64,
    pub in_last_minute: bool,
    /// Warning threshold; zero when the quiz has no last-minute warning.
    pub last_minute_secs: u32,
    /// Cue from the most recent tick; `None` after any other change.
    pub cue: TickCue,
    pub outcome: Option<QuizOutcome>,
}

impl QuizSnapshot {
    pub(crate) fn capture(
        test_type: TestType,
        session: &QuizSession,
        cue: TickCue,
        outcome: Option<QuizOutcome>,
    ) -> Self {
        let question = session.current_question();
        Self {
            test_type,
            question_number: session.current_index() + 1,
            total: session.total(),
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            selected: session.selected_option(),
            submitted: session.is_submitted(),
            last_answer_correct: session.last_answer_correct(),
            score: session.score(),
            remaining_secs: session.remaining_secs(),
            progress: session.progress(),
            in_last_minute: session.in_last_minute(),
            last_minute_secs: session.settings().last_minute_secs(),
            cue,
            outcome,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}
