// src/handlers/quizlets.rs

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
    models::quizlet::{Quizlet, UpsertQuizletRequest},
};

pub async fn list_quizlets(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizlets = sqlx::query_as::<_, Quizlet>(
        "SELECT id, lesson_id, question, answer FROM quizlet ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizlets: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizlets))
}

/// Lists the flashcards of one lesson.
pub async fn get_quizlets_by_lesson(
    State(pool): State<SqlitePool>,
    Path(lesson_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quizlets = sqlx::query_as::<_, Quizlet>(
        "SELECT id, lesson_id, question, answer FROM quizlet WHERE lesson_id = ? ORDER BY id",
    )
    .bind(lesson_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(quizlets))
}

pub async fn get_quizlet(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quizlet = sqlx::query_as::<_, Quizlet>(
        "SELECT id, lesson_id, question, answer FROM quizlet WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Quizlet not found".to_string()))?;

    Ok(Json(quizlet))
}

pub async fn create_quizlet(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpsertQuizletRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO quizlet (lesson_id, question, answer) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(payload.lesson_id)
    .bind(&payload.question)
    .bind(&payload.answer)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quizlet: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

pub async fn update_quizlet(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertQuizletRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = sqlx::query("UPDATE quizlet SET lesson_id = ?, question = ?, answer = ? WHERE id = ?")
        .bind(payload.lesson_id)
        .bind(&payload.question)
        .bind(&payload.answer)
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quizlet not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_quizlet(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM quizlet WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quizlet not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
