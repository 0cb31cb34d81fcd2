use std::sync::Arc;

use quiz_core::model::{Question, TestType};
use storage::repository::{InMemoryRepository, QuestionRepository, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_repo};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_both_tests() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quick Test"), "missing quick link in {html}");
    assert!(html.contains("Free Test"), "missing free link in {html}");
    assert!(html.contains("30:00"), "missing time limit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_counts() {
    let mut harness = setup_view_harness(ViewKind::Result { score: 1, total: 3 }).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Test Completed"), "missing title in {html}");
    assert!(html.contains("Wrong"), "missing wrong label in {html}");
    assert!(html.contains("33.33%"), "missing accuracy in {html}");
    assert!(html.contains("Back to Home"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz("quick".into())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quick Test"), "missing title in {html}");
    assert!(html.contains("QUICK"), "missing badge in {html}");
    assert!(html.contains("30:00"), "missing timer in {html}");
    assert!(html.contains("Q.1  What is 2 + 2?"), "missing prompt in {html}");
    assert!(html.contains("Skip"), "missing skip in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_asks_for_a_selection() {
    let mut harness = setup_view_harness(ViewKind::Quiz("free".into())).await;
    harness.settle().await;

    harness.quiz_handles.dispatch().call(QuizIntent::Submit);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Choose an option"), "missing notice in {html}");
    assert!(html.contains("Q.1"), "question changed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_answer_feedback() {
    let mut harness = setup_view_harness(ViewKind::Quiz("quick".into())).await;
    harness.settle().await;

    let dispatch = harness.quiz_handles.dispatch();
    dispatch.call(QuizIntent::Select(1));
    dispatch.call(QuizIntent::Submit);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("quiz-option--correct"), "missing feedback in {html}");
    assert!(html.contains("disabled"), "options still enabled in {html}");
    assert!(!html.contains("Choose an option"), "stale notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_skip_moves_on() {
    let mut harness = setup_view_harness(ViewKind::Quiz("quick".into())).await;
    harness.settle().await;

    harness.quiz_handles.dispatch().call(QuizIntent::Skip);
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Q.2  Capital of France?"),
        "missing second question in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_finishes_to_results() {
    let mut harness = setup_view_harness(ViewKind::Quiz("quick".into())).await;
    harness.settle().await;

    let dispatch = harness.quiz_handles.dispatch();
    for _ in 0..3 {
        dispatch.call(QuizIntent::Skip);
    }
    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Test Completed"), "results not shown in {html}");
    assert!(html.contains("0.00%"), "missing accuracy in {html}");
    assert!(!html.contains("Q.3"), "quiz still rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn default_quiz_view_smoke_runs_quick_test() {
    let mut harness = setup_view_harness(ViewKind::DefaultQuiz).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quick Test"), "missing title in {html}");
    assert!(html.contains("QUICK"), "missing badge in {html}");
    assert!(html.contains("Q.1  What is 2 + 2?"), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_rejects_unsupported_type() {
    let mut harness = setup_view_harness(ViewKind::Quiz("premium".into())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Not supported"), "missing title in {html}");
    assert!(
        html.contains("This page supports only Quick and Free tests."),
        "missing message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_bank() {
    let repo: Arc<dyn QuestionRepository> = Arc::new(InMemoryRepository::new());
    let mut harness = setup_view_harness_with_repo(ViewKind::Quiz("quick".into()), repo);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No questions yet"), "missing empty state in {html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn upsert_question(
        &self,
        _test_type: TestType,
        _position: u32,
        _question: &Question,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_questions(&self, _test_type: TestType) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn count_questions(&self, _test_type: TestType) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_repo(
        ViewKind::Quiz("quick".into()),
        Arc::new(FailingRepo),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
