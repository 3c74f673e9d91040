// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// One exam attempt by a user. The per-question picks live in
/// `submission_record` and reference this row by id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub upload_time: DateTime<Utc>,

    /// Grade on a 0..10 scale, set once the attempt has been marked.
    pub grade: Option<f64>,

    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub user_id: i64,

    pub exam_id: i64,

    #[validate(range(min = 0.0, max = 10.0))]
    pub grade: Option<f64>,

    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

/// DTO for updating a submission. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubmissionRequest {
    #[validate(range(min = 0.0, max = 10.0))]
    pub grade: Option<f64>,

    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}
