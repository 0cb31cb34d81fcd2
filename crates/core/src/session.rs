use thiserror::Error;

use crate::model::{Question, QuestionId, QuizSettings};
use crate::results::QuizResult;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("choose an option before submitting")]
    NoSelection,

    #[error("the current answer is already submitted")]
    AlreadySubmitted,

    #[error("quiz has already finished")]
    Finished,

    #[error("no questions available for quiz")]
    Empty,

    #[error("too many questions for a single quiz: {len}")]
    TooManyQuestions { len: usize },
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The last question was answered or skipped.
    Completed,
    /// The countdown reached zero.
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Active,
    Finished(FinishReason),
}

/// What the view should do in response to a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickCue {
    None,
    /// Brief flash of the timer, every few seconds before the last minute.
    Pulse,
    /// Entered the last minute; fires once.
    LastMinute,
    Expired,
}

/// A deferred `advance` bound to the question it was scheduled from.
///
/// Redeemed with [`QuizSession::complete_advance`]; a token for a question that
/// is no longer current does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingAdvance {
    question_index: usize,
}

impl PendingAdvance {
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }
}

/// Outcome of locking in an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub question_id: QuestionId,
    pub chosen_index: usize,
    pub correct: bool,
    pub score: u32,
    pub advance: PendingAdvance,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed run through a fixed, ordered list of questions.
///
/// Mutated only through its own operations. Once finished, every operation is
/// a no-op or rejected and only the final score can be read.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    total: u32,
    settings: QuizSettings,
    current: usize,
    score: u32,
    remaining_secs: u32,
    selected: Option<usize>,
    submitted: bool,
    last_correct: Option<bool>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start a session over the given questions with a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are provided and
    /// `QuizError::TooManyQuestions` if the count does not fit in `u32`.
    pub fn new(questions: Vec<Question>, settings: QuizSettings) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let total = u32::try_from(questions.len())
            .map_err(|_| QuizError::TooManyQuestions {
                len: questions.len(),
            })?;

        Ok(Self {
            questions,
            total,
            settings,
            current: 0,
            score: 0,
            remaining_secs: settings.time_limit_secs(),
            selected: None,
            submitted: false,
            last_correct: None,
            phase: QuizPhase::Active,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Correctness of the locked-in answer, until the next advance.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.last_correct
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, QuizPhase::Finished(_))
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self.phase {
            QuizPhase::Active => None,
            QuizPhase::Finished(reason) => Some(reason),
        }
    }

    #[must_use]
    pub fn in_last_minute(&self) -> bool {
        self.remaining_secs <= self.settings.last_minute_secs()
    }

    /// Fraction of the quiz reached, counting the current question.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.current as f64 + 1.0) / f64::from(self.total)
    }

    #[must_use]
    pub fn result(&self) -> QuizResult {
        QuizResult::new(self.score, self.total)
    }

    /// Choose an option for the current question.
    ///
    /// Ignored after submission, after the quiz finished, or for an index the
    /// question does not have. Returns whether the selection was applied.
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.is_finished() || self.submitted {
            return false;
        }
        if index >= self.current_question().options().len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Lock in the selected option and score it.
    ///
    /// The returned `PendingAdvance` must be redeemed by the caller once the
    /// feedback delay (`settings().advance_delay()`) has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` when nothing is selected,
    /// `QuizError::AlreadySubmitted` when the answer is already locked in and
    /// `QuizError::Finished` once the quiz is over. State is unchanged on error.
    pub fn submit_and_advance(&mut self) -> Result<Submission, QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let Some(chosen_index) = self.selected else {
            return Err(QuizError::NoSelection);
        };

        let question = &self.questions[self.current];
        let correct = question
            .option(chosen_index)
            .is_some_and(|chosen| question.is_correct(chosen));
        let question_id = question.id();

        self.submitted = true;
        self.last_correct = Some(correct);
        if correct {
            self.score = self.score.saturating_add(1).min(self.total);
        }

        Ok(Submission {
            question_id,
            chosen_index,
            correct,
            score: self.score,
            advance: PendingAdvance {
                question_index: self.current,
            },
        })
    }

    /// Redeem a deferred advance. Returns whether the session moved.
    pub fn complete_advance(&mut self, pending: PendingAdvance) -> bool {
        if self.is_finished() || pending.question_index != self.current {
            return false;
        }
        self.advance();
        true
    }

    /// Move on without scoring, whether or not the answer was submitted.
    pub fn skip(&mut self) -> QuizPhase {
        self.advance()
    }

    /// Go to the next question, or finish after the last one.
    pub fn advance(&mut self) -> QuizPhase {
        if self.is_finished() {
            return self.phase;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.submitted = false;
            self.last_correct = None;
        } else {
            self.phase = QuizPhase::Finished(FinishReason::Completed);
        }
        self.phase
    }

    /// One second of the countdown.
    ///
    /// Reaching zero finishes the quiz at once with the score accumulated so
    /// far; an unsubmitted selection does not count.
    pub fn tick(&mut self) -> TickCue {
        if self.is_finished() {
            return TickCue::None;
        }

        let previous = self.remaining_secs;
        self.remaining_secs = previous.saturating_sub(1);

        if self.remaining_secs == 0 {
            self.phase = QuizPhase::Finished(FinishReason::TimeExpired);
            return TickCue::Expired;
        }

        let threshold = self.settings.last_minute_secs();
        if threshold > 0 && previous == threshold + 1 {
            return TickCue::LastMinute;
        }
        if self.remaining_secs > threshold
            && self.remaining_secs % self.settings.pulse_every_secs() == 0
        {
            return TickCue::Pulse;
        }
        TickCue::None
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
