use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::{DateTime, Utc};
use quiz_core::model::TestType;
use quiz_core::{
    Clock, FinishReason, PendingAdvance, QuizPhase, QuizSession, Submission, TickCue,
};
use tokio::sync::watch;
use tokio::time::{Instant, interval_at};

use super::snapshot::{QuizOutcome, QuizSnapshot};
use crate::error::QuizServiceError;
use crate::scheduling::ScheduledTask;

struct RunnerState {
    session: QuizSession,
    countdown: Option<ScheduledTask>,
    pending_advance: Option<ScheduledTask>,
    outcome: Option<QuizOutcome>,
}

struct Inner {
    test_type: TestType,
    clock: Clock,
    started_at: DateTime<Utc>,
    state: Mutex<RunnerState>,
    updates: watch::Sender<QuizSnapshot>,
}

impl Inner {
    fn lock(&self) -> Result<MutexGuard<'_, RunnerState>, QuizServiceError> {
        self.state.lock().map_err(|_| QuizServiceError::Poisoned)
    }

    fn publish(&self, state: &RunnerState, cue: TickCue) {
        self.updates.send_replace(QuizSnapshot::capture(
            self.test_type,
            &state.session,
            cue,
            state.outcome,
        ));
    }

    /// Enter the terminal state: release both timers and record the outcome.
    fn finish(&self, state: &mut RunnerState, reason: FinishReason) {
        if state.outcome.is_some() {
            return;
        }
        state.countdown = None;
        state.pending_advance = None;

        let outcome = QuizOutcome {
            test_type: self.test_type,
            score: state.session.score(),
            total: state.session.total(),
            reason,
            started_at: self.started_at,
            finished_at: self.clock.now(),
        };
        tracing::info!(
            test_type = %self.test_type,
            score = outcome.score,
            total = outcome.total,
            reason = ?reason,
            "quiz finished"
        );
        state.outcome = Some(outcome);
    }

    fn sync_phase(&self, state: &mut RunnerState) {
        if let QuizPhase::Finished(reason) = state.session.phase() {
            self.finish(state, reason);
        }
    }

    /// Returns false once the countdown should stop.
    fn on_tick(&self) -> bool {
        let Ok(mut state) = self.lock() else {
            return false;
        };
        if state.outcome.is_some() {
            return false;
        }

        let cue = state.session.tick();
        match cue {
            TickCue::LastMinute => {
                tracing::debug!(remaining = state.session.remaining_secs(), "last minute");
            }
            TickCue::Expired => tracing::info!("time expired"),
            TickCue::Pulse | TickCue::None => {}
        }
        self.sync_phase(&mut state);
        self.publish(&state, cue);
        state.outcome.is_none()
    }

    fn on_advance_due(&self, pending: PendingAdvance) {
        let Ok(mut state) = self.lock() else {
            return;
        };
        if !state.session.complete_advance(pending) {
            tracing::debug!(
                question_index = pending.question_index(),
                "ignoring stale advance"
            );
            return;
        }
        state.pending_advance = None;
        self.sync_phase(&mut state);
        self.publish(&state, TickCue::None);
    }
}

/// Drives a `QuizSession` in real time.
///
/// Owns the repeating countdown and the deferred advance after each answer.
/// Both are cancelled when the quiz finishes, on [`QuizRunner::shutdown`], and
/// when the runner is dropped. Must be created inside a tokio runtime.
pub struct QuizRunner {
    inner: Arc<Inner>,
}

impl QuizRunner {
    /// Start the countdown for `session` and return the running quiz.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[must_use]
    pub fn start(test_type: TestType, session: QuizSession, clock: Clock) -> Self {
        let period = session.settings().tick_interval();
        let initial = QuizSnapshot::capture(test_type, &session, TickCue::None, None);
        let (updates, _) = watch::channel(initial);

        let inner = Arc::new(Inner {
            test_type,
            clock,
            started_at: clock.now(),
            state: Mutex::new(RunnerState {
                session,
                countdown: None,
                pending_advance: None,
                outcome: None,
            }),
            updates,
        });

        let weak = Arc::downgrade(&inner);
        let countdown = ScheduledTask::spawn("countdown", run_countdown(weak, period));
        if let Ok(mut state) = inner.state.lock() {
            state.countdown = Some(countdown);
        }

        tracing::info!(%test_type, "quiz started");
        Self { inner }
    }

    #[must_use]
    pub fn test_type(&self) -> TestType {
        self.inner.test_type
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.updates.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.updates.subscribe()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.inner.updates.borrow().outcome
    }

    /// Whether the countdown task is still alive.
    #[must_use]
    pub fn countdown_running(&self) -> bool {
        self.inner.lock().is_ok_and(|state| {
            state
                .countdown
                .as_ref()
                .is_some_and(|task| !task.is_finished())
        })
    }

    /// Whether an advance is waiting out the feedback delay.
    #[must_use]
    pub fn advance_pending(&self) -> bool {
        self.inner
            .lock()
            .is_ok_and(|state| state.pending_advance.is_some())
    }

    /// Choose an option; ignored after submission or once finished.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the state lock is poisoned.
    pub fn select_option(&self, index: usize) -> Result<bool, QuizServiceError> {
        let mut state = self.inner.lock()?;
        let applied = state.session.select_option(index);
        if applied {
            self.inner.publish(&state, TickCue::None);
        }
        Ok(applied)
    }

    /// Lock in the selected answer and schedule the move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` (wrapped) when nothing is selected; the
    /// caller should prompt the user to choose an option. Also rejects double
    /// submission and submission after the quiz finished.
    pub fn submit_and_advance(&self) -> Result<Submission, QuizServiceError> {
        let mut state = self.inner.lock()?;
        let submission = state.session.submit_and_advance()?;
        tracing::debug!(
            question_id = %submission.question_id,
            correct = submission.correct,
            score = submission.score,
            "answer submitted"
        );

        let delay = state.session.settings().advance_delay();
        let weak = Arc::downgrade(&self.inner);
        let pending = submission.advance;
        state.pending_advance = Some(ScheduledTask::spawn("advance", async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.on_advance_due(pending);
            }
        }));

        self.inner.publish(&state, TickCue::None);
        Ok(submission)
    }

    /// Move on immediately without scoring. Cancels a pending advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the state lock is poisoned.
    pub fn skip(&self) -> Result<QuizPhase, QuizServiceError> {
        let mut state = self.inner.lock()?;
        if state.outcome.is_some() {
            return Ok(state.session.phase());
        }
        state.pending_advance = None;
        let phase = state.session.skip();
        self.inner.sync_phase(&mut state);
        self.inner.publish(&state, TickCue::None);
        Ok(phase)
    }

    /// Cancel both timers without finishing the quiz, e.g. when the screen
    /// is left. Idempotent.
    pub fn shutdown(&self) {
        let Ok(mut state) = self.inner.lock() else {
            return;
        };
        let had_timers = state.countdown.is_some() || state.pending_advance.is_some();
        state.countdown = None;
        state.pending_advance = None;
        if had_timers {
            tracing::debug!(test_type = %self.inner.test_type, "quiz runner shut down");
        }
    }
}

impl Drop for QuizRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for QuizRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("QuizRunner")
            .field("test_type", &self.inner.test_type)
            .field("question_number", &snapshot.question_number)
            .field("score", &snapshot.score)
            .field("remaining_secs", &snapshot.remaining_secs)
            .field("finished", &snapshot.is_finished())
            .finish_non_exhaustive()
    }
}

async fn run_countdown(inner: Weak<Inner>, period: std::time::Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        if !inner.on_tick() {
            break;
        }
    }
}
