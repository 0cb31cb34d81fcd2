use quiz_core::model::{Question, QuestionId, TestType, sample_questions};
use storage::repository::{QuestionRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn memory_url(name: &str) -> String {
    format!("sqlite:file:{name}?mode=memory&cache=shared")
}

async fn connect(name: &str) -> SqliteRepository {
    SqliteRepository::open(&memory_url(name)).await.expect("open")
}

#[tokio::test]
async fn sqlite_lists_bank_in_position_order() {
    let repo = connect("memdb_bank_order").await;
    let bank = sample_questions();
    for (position, question) in bank.iter().enumerate().rev() {
        repo.upsert_question(TestType::Quick, u32::try_from(position).unwrap(), question)
            .await
            .unwrap();
    }

    let listed = repo.list_questions(TestType::Quick).await.expect("list");
    assert_eq!(listed, bank);
    assert_eq!(repo.count_questions(TestType::Quick).await.unwrap(), 3);
    assert_eq!(repo.count_questions(TestType::Free).await.unwrap(), 0);
    assert!(repo.list_questions(TestType::Free).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_upsert_replaces_question_content() {
    let repo = connect("memdb_upsert").await;
    let original = sample_questions().remove(0);
    repo.upsert_question(TestType::Free, 0, &original).await.unwrap();

    let edited = Question::new(
        QuestionId::new(1),
        "What is 3 + 3?",
        vec!["5".into(), "6".into(), "7".into(), "8".into()],
        "6",
    )
    .unwrap();
    repo.upsert_question(TestType::Free, 0, &edited).await.unwrap();

    let listed = repo.list_questions(TestType::Free).await.unwrap();
    assert_eq!(listed, vec![edited]);
}

#[tokio::test]
async fn sqlite_reopen_keeps_existing_bank() {
    let first = connect("memdb_reopen").await;
    first
        .upsert_question(TestType::Quick, 0, &sample_questions()[0])
        .await
        .unwrap();

    let second = connect("memdb_reopen").await;
    assert_eq!(second.count_questions(TestType::Quick).await.unwrap(), 1);
    second
        .upsert_question(TestType::Quick, 1, &sample_questions()[1])
        .await
        .unwrap();
    assert_eq!(first.count_questions(TestType::Quick).await.unwrap(), 2);
}

#[tokio::test]
async fn storage_sqlite_serves_questions_through_the_trait() {
    let storage = Storage::sqlite(&memory_url("memdb_storage")).await.expect("storage");
    let bank = sample_questions();
    storage
        .questions
        .upsert_question(TestType::Free, 0, &bank[2])
        .await
        .unwrap();

    let listed = storage.questions.list_questions(TestType::Free).await.unwrap();
    assert_eq!(listed, vec![bank[2].clone()]);
}

#[tokio::test]
async fn sqlite_open_fails_when_directory_is_missing() {
    let url = "sqlite:///nonexistent-quiz-dir/nested/bank.sqlite3";
    assert!(SqliteRepository::open(url).await.is_err());
}

#[tokio::test]
async fn sqlite_rejects_corrupt_rows() {
    let repo = connect("memdb_corrupt").await;
    let raw = sqlx::SqlitePool::connect(&memory_url("memdb_corrupt"))
        .await
        .expect("raw pool");
    sqlx::query(
        r#"
        INSERT INTO questions (id, test_type, position, prompt, options, correct_answer)
        VALUES (9, 'quick', 0, 'Broken?', '["a", "b"]', 'c')
        "#,
    )
    .execute(&raw)
    .await
    .unwrap();

    let err = repo.list_questions(TestType::Quick).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidQuestion(_)), "{err:?}");
}
