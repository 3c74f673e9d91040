// src/models/submission_record.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// One answered question inside a submission. The (submission_id, question_id)
/// pair is the natural key, a submission holds at most one pick per question.
/// All references are loose ids, no foreign keys are enforced on this table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub chosen_answer_id: i64,
}

/// One item of a batch upsert (also used for single-record creation).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubmissionRecordRequest {
    #[validate(range(min = 1))]
    pub submission_id: i64,

    #[validate(range(min = 1))]
    pub user_id: i64,

    #[validate(range(min = 1))]
    pub question_id: i64,

    #[validate(range(min = 1))]
    pub chosen_answer_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubmissionRecordRequest {
    #[validate(range(min = 1))]
    pub chosen_answer_id: i64,
}

/// Result of a batch upsert, split by what happened to each touched row.
/// A row appears exactly once across the two lists even when several batch
/// items hit it, rows first inserted by the call stay in `created`.
#[derive(Debug, Serialize)]
pub struct ReconcileOutcome {
    pub created: Vec<SubmissionRecord>,
    pub updated: Vec<SubmissionRecord>,
}
