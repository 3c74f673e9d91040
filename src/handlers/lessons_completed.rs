// src/handlers/lessons_completed.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::lesson_completed::{LessonCompleted, UpsertLessonCompletedRequest},
};

pub async fn list_lessons_completed(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let completions = sqlx::query_as::<_, LessonCompleted>(
        "SELECT id, user_id, lesson_id, completed_at FROM lessons_completed ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list lesson completions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(completions))
}

/// Lists the lessons one user has finished, most recent first.
pub async fn get_lessons_completed_by_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let completions = sqlx::query_as::<_, LessonCompleted>(
        r#"
        SELECT id, user_id, lesson_id, completed_at
        FROM lessons_completed
        WHERE user_id = ?
        ORDER BY completed_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(completions))
}

pub async fn get_lesson_completed(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let completion = sqlx::query_as::<_, LessonCompleted>(
        "SELECT id, user_id, lesson_id, completed_at FROM lessons_completed WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Lesson completion not found".to_string()))?;

    Ok(Json(completion))
}

/// Marks a lesson as completed. `completed_at` defaults to now.
pub async fn create_lesson_completed(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpsertLessonCompletedRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let completed_at = payload.completed_at.unwrap_or_else(Utc::now);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO lessons_completed (user_id, lesson_id, completed_at)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(payload.user_id)
    .bind(payload.lesson_id)
    .bind(completed_at)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create lesson completion: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

pub async fn update_lesson_completed(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertLessonCompletedRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let completed_at = payload.completed_at.unwrap_or_else(Utc::now);

    let result = sqlx::query(
        "UPDATE lessons_completed SET user_id = ?, lesson_id = ?, completed_at = ? WHERE id = ?",
    )
    .bind(payload.user_id)
    .bind(payload.lesson_id)
    .bind(completed_at)
    .bind(id)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Lesson completion not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_lesson_completed(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM lessons_completed WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Lesson completion not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
