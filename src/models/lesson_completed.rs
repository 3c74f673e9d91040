// src/models/lesson_completed.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Marks a lesson as finished by a user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonCompleted {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: i64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertLessonCompletedRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,

    #[validate(range(min = 1))]
    pub lesson_id: i64,

    /// Defaults to the current time when absent.
    pub completed_at: Option<DateTime<Utc>>,
}
