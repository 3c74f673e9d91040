use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::user::validate_url_string;

/// Represents the 'lessons' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,

    pub topic_id: i64,

    pub title: String,

    /// Rich-text body of the lesson. Sanitized on write, so it is safe to
    /// render as HTML.
    pub content: Option<String>,

    pub video_url: Option<String>,

    pub short_describe: Option<String>,
}

/// DTO for creating or fully replacing a lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertLessonRequest {
    pub topic_id: i64,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,

    #[validate(length(max = 50000))]
    pub content: Option<String>,

    #[validate(custom(function = validate_url_string))]
    pub video_url: Option<String>,

    #[validate(length(max = 500))]
    pub short_describe: Option<String>,
}
