use std::sync::Arc;

use quiz_core::model::{QuizSettings, TestType, sample_questions};
use quiz_core::{QuizError, QuizSession};
use rand::rng;
use rand::seq::SliceRandom;
use storage::repository::QuestionRepository;

use super::runner::QuizRunner;
use crate::Clock;
use crate::error::QuizServiceError;

/// Loads question banks and starts timed quiz runs.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    settings: QuizSettings,
    shuffle: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            clock,
            questions,
            settings: QuizSettings::default(),
            shuffle: false,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Shuffle question order once per run. The order is then fixed for the run.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Build a session for the given test type without starting any timers.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Empty` if the bank has no questions, or a
    /// storage error if it cannot be read.
    pub async fn prepare_session(
        &self,
        test_type: TestType,
    ) -> Result<QuizSession, QuizServiceError> {
        let mut questions = self.questions.list_questions(test_type).await?;
        if self.shuffle {
            questions.shuffle(&mut rng());
        }
        match QuizSession::new(questions, self.settings) {
            Ok(session) => Ok(session),
            Err(QuizError::Empty) => Err(QuizServiceError::Empty(test_type)),
            Err(err) => Err(err.into()),
        }
    }

    /// Start a timed quiz. The countdown begins immediately.
    ///
    /// Must be awaited inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::prepare_session`].
    pub async fn start_quiz(&self, test_type: TestType) -> Result<QuizRunner, QuizServiceError> {
        let session = self.prepare_session(test_type).await?;
        tracing::debug!(
            %test_type,
            questions = session.total(),
            time_limit_secs = self.settings.time_limit_secs(),
            "starting quiz"
        );
        Ok(QuizRunner::start(test_type, session, self.clock))
    }

    /// Parse a route parameter and start the quiz it names.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::TestType` for unsupported test types, plus
    /// everything [`QuizLoopService::start_quiz`] can return.
    pub async fn start_quiz_for_param(
        &self,
        raw: Option<&str>,
    ) -> Result<QuizRunner, QuizServiceError> {
        let test_type = TestType::from_param(raw)?;
        self.start_quiz(test_type).await
    }

    /// Write the bundled sample questions into every empty bank.
    ///
    /// Returns the number of banks that were seeded.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a bank cannot be read or written.
    pub async fn ensure_sample_banks(&self) -> Result<u32, QuizServiceError> {
        let mut seeded = 0;
        for test_type in TestType::ALL {
            if self.questions.count_questions(test_type).await? > 0 {
                continue;
            }
            for (position, question) in sample_questions().iter().enumerate() {
                let position = u32::try_from(position).unwrap_or(u32::MAX);
                self.questions
                    .upsert_question(test_type, position, question)
                    .await?;
            }
            tracing::info!(%test_type, "seeded sample question bank");
            seeded += 1;
        }
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    struct OfflineRepo;

    #[async_trait::async_trait]
    impl QuestionRepository for OfflineRepo {
        async fn upsert_question(
            &self,
            _test_type: TestType,
            _position: u32,
            _question: &Question,
        ) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn list_questions(&self, _test_type: TestType) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn count_questions(&self, _test_type: TestType) -> Result<u32, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    fn service(repo: InMemoryRepository) -> QuizLoopService {
        QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(repo))
    }

    #[tokio::test]
    async fn empty_bank_is_reported_per_test_type() {
        let svc = service(InMemoryRepository::new());
        let err = svc.prepare_session(TestType::Free).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Empty(TestType::Free)));
    }

    #[tokio::test]
    async fn sample_banks_are_seeded_once() {
        let svc = service(InMemoryRepository::new());
        assert_eq!(svc.ensure_sample_banks().await.unwrap(), 2);
        assert_eq!(svc.ensure_sample_banks().await.unwrap(), 0);

        let session = svc.prepare_session(TestType::Quick).await.unwrap();
        assert_eq!(session.total(), 3);
        assert_eq!(session.remaining_secs(), 1800);
        assert_eq!(session.current_question().prompt(), "What is 2 + 2?");
    }

    #[tokio::test]
    async fn shuffle_keeps_every_question() {
        let svc = service(InMemoryRepository::new()).with_shuffle(true);
        svc.ensure_sample_banks().await.unwrap();
        let session = svc.prepare_session(TestType::Quick).await.unwrap();
        let mut ids: Vec<u64> = session.questions().iter().map(|q| q.id().value()).collect();
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn unsupported_param_is_rejected() {
        let svc = service(InMemoryRepository::new());
        svc.ensure_sample_banks().await.unwrap();
        let err = svc.start_quiz_for_param(Some("premium")).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::TestType(_)));
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let svc = QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(OfflineRepo));
        let err = svc.start_quiz(TestType::Quick).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Storage(StorageError::Connection(_))));
        assert!(svc.ensure_sample_banks().await.is_err());
    }
}
