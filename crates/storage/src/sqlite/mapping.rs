use quiz_core::model::{QuestionId, TestType};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{QuestionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question_id overflow".into()))
}

fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u64::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization("question_id sign overflow".into()))
}

pub(crate) fn encode_options(options: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(options).map_err(ser)
}

fn decode_options(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<QuestionRecord, StorageError> {
    let test_type: String = row.try_get("test_type").map_err(ser)?;
    let position: i64 = row.try_get("position").map_err(ser)?;
    let options: String = row.try_get("options").map_err(ser)?;

    Ok(QuestionRecord {
        id: question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        test_type: test_type.parse::<TestType>().map_err(ser)?,
        position: u32::try_from(position)
            .map_err(|_| StorageError::Serialization(format!("invalid position: {position}")))?,
        prompt: row.try_get("prompt").map_err(ser)?,
        options: decode_options(&options)?,
        correct_answer: row.try_get("correct_answer").map_err(ser)?,
    })
}
