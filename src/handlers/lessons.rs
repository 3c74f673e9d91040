// src/handlers/lessons.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::lesson::{Lesson, UpsertLessonRequest},
};

pub async fn list_lessons(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let lessons = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT id, topic_id, title, content, video_url, short_describe
        FROM lessons
        ORDER BY topic_id, id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list lessons: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(lessons))
}

pub async fn get_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT id, topic_id, title, content, video_url, short_describe
        FROM lessons
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Lesson not found".to_string()))?;

    Ok(Json(lesson))
}

/// Creates a lesson. The rich-text `content` is sanitized before it is
/// stored so it can be rendered as HTML without further escaping.
pub async fn create_lesson(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpsertLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let content = payload.content.as_deref().map(ammonia::clean);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO lessons (topic_id, title, content, video_url, short_describe)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(payload.topic_id)
    .bind(&payload.title)
    .bind(&content)
    .bind(&payload.video_url)
    .bind(&payload.short_describe)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create lesson: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

pub async fn update_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertLessonRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let content = payload.content.as_deref().map(ammonia::clean);

    let result = sqlx::query(
        r#"
        UPDATE lessons
        SET topic_id = ?, title = ?, content = ?, video_url = ?, short_describe = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.topic_id)
    .bind(&payload.title)
    .bind(&content)
    .bind(&payload.video_url)
    .bind(&payload.short_describe)
    .bind(id)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Lesson not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_lesson(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Lesson not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
