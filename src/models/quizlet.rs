// src/models/quizlet.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// A flashcard attached to a lesson.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quizlet {
    pub id: i64,
    pub lesson_id: i64,
    pub question: String,
    pub answer: String,
}

/// DTO for creating or fully replacing a flashcard.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertQuizletRequest {
    pub lesson_id: i64,

    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(length(min = 1, max = 1000))]
    pub answer: String,
}
