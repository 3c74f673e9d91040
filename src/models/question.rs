// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub exam_id: Option<i64>,

    pub topic_id: Option<i64>,

    /// The text content of the question.
    pub content: Option<String>,

    /// Question type: 'single' (single choice) or 'multiple' (multiple choice).
    /// Mapped from the database column 'type' since `type` is a reserved keyword in Rust.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

/// Represents the 'answers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub content: Option<String>,
    pub is_correct: bool,
}

/// DTO for sending a question to the client together with its answers.
#[derive(Debug, Serialize)]
pub struct QuestionWithAnswers {
    pub id: i64,
    pub exam_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub answers: Vec<AnswerOut>,
}

/// Answer as embedded in `QuestionWithAnswers`.
#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub id: i64,
    pub content: Option<String>,
    pub is_correct: bool,
}

/// DTO for creating a new question with its answer options.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub exam_id: Option<i64>,

    pub topic_id: Option<i64>,

    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20))]
    pub question_type: String,

    #[validate(custom(function = validate_answers))]
    pub answers: Vec<CreateAnswerRequest>,
}

/// One answer option inside `CreateQuestionRequest`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAnswerRequest {
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

fn validate_answers(answers: &[CreateAnswerRequest]) -> Result<(), validator::ValidationError> {
    if answers.is_empty() {
        return Err(validator::ValidationError::new("answers_cannot_be_empty"));
    }
    for ans in answers {
        if ans.content.is_empty() || ans.content.len() > 500 {
            return Err(validator::ValidationError::new("answer_content_length"));
        }
    }
    if !answers.iter().any(|a| a.is_correct) {
        return Err(validator::ValidationError::new("no_correct_answer"));
    }
    Ok(())
}
