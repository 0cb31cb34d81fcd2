use quiz_core::model::{Question, TestType};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{encode_options, map_question_row, question_id_to_i64, ser};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_question(
        &self,
        test_type: TestType,
        position: u32,
        question: &Question,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, test_type, position, prompt, options, correct_answer)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(test_type, id) DO UPDATE SET
                position = excluded.position,
                prompt = excluded.prompt,
                options = excluded.options,
                correct_answer = excluded.correct_answer
            ",
        )
        .bind(question_id_to_i64(question.id())?)
        .bind(test_type.as_str())
        .bind(i64::from(position))
        .bind(question.prompt())
        .bind(encode_options(question.options())?)
        .bind(question.correct_answer())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_questions(&self, test_type: TestType) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, test_type, position, prompt, options, correct_answer
            FROM questions
            WHERE test_type = ?1
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(test_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?.into_question()?);
        }
        Ok(questions)
    }

    async fn count_questions(&self, test_type: TestType) -> Result<u32, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM questions WHERE test_type = ?1")
            .bind(test_type.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u32::try_from(n).map_err(|_| StorageError::Serialization(format!("invalid count: {n}")))
    }
}
