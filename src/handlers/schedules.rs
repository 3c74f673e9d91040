// src/handlers/schedules.rs

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
    models::schedule::{ScheduleEntry, UpsertScheduleRequest},
};

const SCHEDULE_COLUMNS: &str = "id, user_id, title, description, type, event_date, start_time";

pub async fn list_schedules(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let entries = sqlx::query_as::<_, ScheduleEntry>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedule ORDER BY event_date, start_time"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list schedule entries: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(entries))
}

/// Lists one user's schedule in chronological order.
pub async fn get_schedules_by_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let entries = sqlx::query_as::<_, ScheduleEntry>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedule WHERE user_id = ? ORDER BY event_date, start_time"
    ))
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(entries))
}

pub async fn get_schedule(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let entry = sqlx::query_as::<_, ScheduleEntry>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedule WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Schedule entry not found".to_string()))?;

    Ok(Json(entry))
}

pub async fn create_schedule(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpsertScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO schedule (user_id, title, description, type, event_date, start_time)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(payload.user_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.entry_type)
    .bind(payload.event_date)
    .bind(payload.start_time)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create schedule entry: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

pub async fn update_schedule(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpsertScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = sqlx::query(
        r#"
        UPDATE schedule
        SET user_id = ?, title = ?, description = ?, type = ?, event_date = ?, start_time = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.user_id)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.entry_type)
    .bind(payload.event_date)
    .bind(payload.start_time)
    .bind(id)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Schedule entry not found".to_string()));
    }

    Ok(StatusCode::OK)
}

pub async fn delete_schedule(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM schedule WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Schedule entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
