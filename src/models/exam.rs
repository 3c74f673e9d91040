use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'exams' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,

    pub name: String,

    /// Year the exam was given (e.g., 2024).
    pub year: Option<i64>,

    /// Province or city the exam originates from.
    pub province: Option<String>,

    pub topic_id: Option<i64>,

    /// Difficulty/quality rating from 1 to 5.
    pub rating: Option<i64>,

    pub student_attempt: i64,

    pub correct_attempt: i64,

    pub added_on: Option<chrono::NaiveDate>,
}

/// DTO for creating an exam.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters."))]
    pub name: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i64>,

    #[validate(length(max = 100))]
    pub province: Option<String>,

    pub topic_id: Option<i64>,

    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,

    pub student_attempt: Option<i64>,

    pub correct_attempt: Option<i64>,

    pub added_on: Option<chrono::NaiveDate>,
}

/// DTO for updating an exam. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i64>,

    #[validate(length(max = 100))]
    pub province: Option<String>,

    pub topic_id: Option<i64>,

    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,

    pub student_attempt: Option<i64>,

    pub correct_attempt: Option<i64>,

    pub added_on: Option<chrono::NaiveDate>,
}

/// Query parameters for listing exams.
#[derive(Debug, Deserialize)]
pub struct ExamListParams {
    /// Number of exams to skip (default: 0).
    pub skip: Option<i64>,

    /// Number of exams to return (default and max: 100).
    pub limit: Option<i64>,
}
