// src/handlers/submission_records.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

use crate::{
    error::AppError,
    models::submission_record::{
        CreateSubmissionRecordRequest, ReconcileOutcome, SubmissionRecord,
        UpdateSubmissionRecordRequest,
    },
};

const RECORD_COLUMNS: &str = "id, submission_id, user_id, question_id, chosen_answer_id";

/// How a row entered the current batch.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Origin {
    Created,
    Updated,
}

fn ownership_conflict(item: &CreateSubmissionRecordRequest) -> AppError {
    AppError::OwnershipConflict(format!(
        "user_id mismatch for submission_id={} question_id={}",
        item.submission_id, item.question_id
    ))
}

/// Splits the touched rows into the two result lists, keeping first-touch
/// order within each.
fn partition_touched(touched: Vec<(SubmissionRecord, Origin)>) -> ReconcileOutcome {
    let mut created = Vec::new();
    let mut updated = Vec::new();
    for (record, origin) in touched {
        match origin {
            Origin::Created => created.push(record),
            Origin::Updated => updated.push(record),
        }
    }
    ReconcileOutcome { created, updated }
}

/// Checks ownership of an existing row and writes the new answer choice.
async fn apply_update(
    tx: &mut Transaction<'_, Sqlite>,
    existing: SubmissionRecord,
    item: &CreateSubmissionRecordRequest,
) -> Result<SubmissionRecord, AppError> {
    if existing.user_id != item.user_id {
        return Err(ownership_conflict(item));
    }

    sqlx::query("UPDATE submission_record SET chosen_answer_id = ? WHERE id = ?")
        .bind(item.chosen_answer_id)
        .bind(existing.id)
        .execute(&mut **tx)
        .await?;

    Ok(SubmissionRecord {
        chosen_answer_id: item.chosen_answer_id,
        ..existing
    })
}

/// Reconciles a batch of answer picks against the store in one transaction.
///
/// * Items are applied in input order. A row inserted earlier in the batch is
///   visible to later items through a call-local map keyed on
///   (`submission_id`, `question_id`), so a duplicate pair takes the update
///   path against the in-flight row instead of inserting twice.
/// * A pair already stored under a different `user_id` aborts the whole call
///   with `OwnershipConflict`; dropping the transaction rolls back every
///   write made so far.
/// * An insert that loses the race against a concurrent call (unique
///   violation on the pair index) re-reads the winning row and degrades to
///   the update path inside the same transaction.
///
/// Every touched row appears exactly once across the two result lists,
/// carrying its final state. Rows first inserted by this call stay under
/// `created` even when later items overwrite them.
pub async fn reconcile(
    pool: &SqlitePool,
    items: &[CreateSubmissionRecordRequest],
) -> Result<ReconcileOutcome, AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    // Rows touched by this call, in first-touch order.
    let mut touched: Vec<(SubmissionRecord, Origin)> = Vec::new();
    let mut by_pair: HashMap<(i64, i64), usize> = HashMap::new();

    for item in items {
        let pair = (item.submission_id, item.question_id);

        // 1. A row this call already created or updated.
        if let Some(&slot) = by_pair.get(&pair) {
            let (record, _) = &mut touched[slot];
            if record.user_id != item.user_id {
                return Err(ownership_conflict(item));
            }

            sqlx::query("UPDATE submission_record SET chosen_answer_id = ? WHERE id = ?")
                .bind(item.chosen_answer_id)
                .bind(record.id)
                .execute(&mut *tx)
                .await?;

            record.chosen_answer_id = item.chosen_answer_id;
            continue;
        }

        // 2. A row that existed before this call.
        let existing = sqlx::query_as::<_, SubmissionRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM submission_record WHERE submission_id = ? AND question_id = ?"
        ))
        .bind(item.submission_id)
        .bind(item.question_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(existing) = existing {
            let record = apply_update(&mut tx, existing, item).await?;
            by_pair.insert(pair, touched.len());
            touched.push((record, Origin::Updated));
            continue;
        }

        // 3. A new pair.
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO submission_record (submission_id, user_id, question_id, chosen_answer_id)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(item.submission_id)
        .bind(item.user_id)
        .bind(item.question_id)
        .bind(item.chosen_answer_id)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(id) => {
                by_pair.insert(pair, touched.len());
                touched.push((
                    SubmissionRecord {
                        id,
                        submission_id: item.submission_id,
                        user_id: item.user_id,
                        question_id: item.question_id,
                        chosen_answer_id: item.chosen_answer_id,
                    },
                    Origin::Created,
                ));
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // A concurrent call inserted this pair after our lookup.
                let existing = sqlx::query_as::<_, SubmissionRecord>(&format!(
                    "SELECT {RECORD_COLUMNS} FROM submission_record WHERE submission_id = ? AND question_id = ?"
                ))
                .bind(item.submission_id)
                .bind(item.question_id)
                .fetch_one(&mut *tx)
                .await?;

                let record = apply_update(&mut tx, existing, item).await?;
                by_pair.insert(pair, touched.len());
                touched.push((record, Origin::Updated));
            }
            Err(e) => {
                tracing::error!("Failed to insert submission record: {:?}", e);
                return Err(AppError::InternalServerError(e.to_string()));
            }
        }
    }

    tx.commit()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(partition_touched(touched))
}

/// Applies a whole batch of answer picks atomically.
///
/// Responds 201 with the touched rows, created ones first. An ownership
/// mismatch anywhere in the batch fails the call with 400 and leaves the
/// store untouched.
pub async fn batch_upsert_submission_records(
    State(pool): State<SqlitePool>,
    Json(items): Json<Vec<CreateSubmissionRecordRequest>>,
) -> Result<impl IntoResponse, AppError> {
    for item in &items {
        item.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
    }

    let outcome = reconcile(&pool, &items).await?;

    let mut records = outcome.created;
    records.extend(outcome.updated);

    Ok((StatusCode::CREATED, Json(records)))
}

pub async fn list_submission_records(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let records = sqlx::query_as::<_, SubmissionRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM submission_record ORDER BY id"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list submission records: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(records))
}

pub async fn get_submission_record(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = sqlx::query_as::<_, SubmissionRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM submission_record WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Submission record not found".to_string()))?;

    Ok(Json(record))
}

/// Creates a single record. The (submission, question) pair must be free.
pub async fn create_submission_record(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateSubmissionRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO submission_record (submission_id, user_id, question_id, chosen_answer_id)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(payload.submission_id)
    .bind(payload.user_id)
    .bind(payload.question_id)
    .bind(payload.chosen_answer_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            AppError::Conflict(format!(
                "Record for submission_id={} question_id={} already exists",
                payload.submission_id, payload.question_id
            ))
        } else {
            tracing::error!("Failed to create submission record: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Rewrites the chosen answer of one record.
pub async fn update_submission_record(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSubmissionRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = sqlx::query("UPDATE submission_record SET chosen_answer_id = ? WHERE id = ?")
        .bind(payload.chosen_answer_id)
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Submission record not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_submission_record(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM submission_record WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Submission record not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
