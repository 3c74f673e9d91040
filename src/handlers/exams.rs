// src/handlers/exams.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    config::MAX_LIST_LIMIT,
    error::AppError,
    models::exam::{CreateExamRequest, Exam, ExamListParams, UpdateExamRequest},
};

const EXAM_COLUMNS: &str =
    "id, name, year, province, topic_id, rating, student_attempt, correct_attempt, added_on";

/// Lists exams with `skip`/`limit` pagination. `limit` is capped.
pub async fn list_exams(
    State(pool): State<SqlitePool>,
    Query(params): Query<ExamListParams>,
) -> Result<impl IntoResponse, AppError> {
    let skip = params.skip.unwrap_or(0).max(0);
    let limit = params.limit.unwrap_or(MAX_LIST_LIMIT).clamp(0, MAX_LIST_LIMIT); // LIMIT -1 would mean unbounded

    let exams = sqlx::query_as::<_, Exam>(&format!(
        "SELECT {EXAM_COLUMNS} FROM exams ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(skip)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exams: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(exams))
}

pub async fn get_exam(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam =
        sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = ?"))
            .bind(id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam))
}

pub async fn create_exam(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO exams (name, year, province, topic_id, rating, student_attempt, correct_attempt, added_on)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&payload.name)
    .bind(payload.year)
    .bind(&payload.province)
    .bind(payload.topic_id)
    .bind(payload.rating)
    .bind(payload.student_attempt.unwrap_or(0))
    .bind(payload.correct_attempt.unwrap_or(0))
    .bind(payload.added_on)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Partial update: only the provided fields are written.
pub async fn update_exam(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if payload.name.is_none()
        && payload.year.is_none()
        && payload.province.is_none()
        && payload.topic_id.is_none()
        && payload.rating.is_none()
        && payload.student_attempt.is_none()
        && payload.correct_attempt.is_none()
        && payload.added_on.is_none()
    {
        return Ok(StatusCode::OK);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE exams SET ");
    let mut separated = builder.separated(", ");

    if let Some(name) = payload.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
    }

    if let Some(year) = payload.year {
        separated.push("year = ");
        separated.push_bind_unseparated(year);
    }

    if let Some(province) = payload.province {
        separated.push("province = ");
        separated.push_bind_unseparated(province);
    }

    if let Some(topic_id) = payload.topic_id {
        separated.push("topic_id = ");
        separated.push_bind_unseparated(topic_id);
    }

    if let Some(rating) = payload.rating {
        separated.push("rating = ");
        separated.push_bind_unseparated(rating);
    }

    if let Some(student_attempt) = payload.student_attempt {
        separated.push("student_attempt = ");
        separated.push_bind_unseparated(student_attempt);
    }

    if let Some(correct_attempt) = payload.correct_attempt {
        separated.push("correct_attempt = ");
        separated.push_bind_unseparated(correct_attempt);
    }

    if let Some(added_on) = payload.added_on {
        separated.push("added_on = ");
        separated.push_bind_unseparated(added_on);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_exam(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM exams WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
