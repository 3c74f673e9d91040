// src/handlers/topics.rs

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
    models::topic::{Topic, UpsertTopicRequest},
};

pub async fn list_topics(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let topics =
        sqlx::query_as::<_, Topic>("SELECT id, name, description FROM topics ORDER BY id")
            .fetch_all(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list topics: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(topics))
}

pub async fn get_topic(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let topic =
        sqlx::query_as::<_, Topic>("SELECT id, name, description FROM topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::NotFound("Topic not found".to_string()))?;

    Ok(Json(topic))
}

pub async fn create_topic(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpsertTopicRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO topics (name, description) VALUES (?, ?) RETURNING id",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create topic: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

pub async fn update_topic(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertTopicRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = sqlx::query("UPDATE topics SET name = ?, description = ? WHERE id = ?")
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Topic not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_topic(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM topics WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Topic not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
