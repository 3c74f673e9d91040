// src/handlers/reset.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::{Executor, SqlitePool};

use crate::error::AppError;

const SEED_SQL: &str = include_str!("../../seed.sql");

/// Tables in child-first order so deletes never trip foreign keys.
const TABLES: [&str; 11] = [
    "submission_record",
    "lessons_completed",
    "quizlet",
    "answers",
    "questions",
    "submissions",
    "schedule",
    "lessons",
    "exams",
    "topics",
    "users",
];

/// Applies the bundled sample dataset. The script only inserts rows that are
/// not already present, so running it against a populated database is a no-op.
pub async fn apply_seed(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SEED_SQL).execute(pool).await.map_err(|e| {
        tracing::error!("Failed to apply seed data: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(())
}

/// Wipes every table and reapplies the sample dataset in one transaction.
pub async fn reset_database(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let mut tx = pool.begin().await?;

    for table in TABLES {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to clear table {}: {:?}", table, e);
                AppError::InternalServerError(e.to_string())
            })?;
    }

    // Calling `Executor::execute` on the connection (rather than
    // `RawSql::execute`, its one-line inline wrapper) sidesteps a rustc
    // "implementation of `Executor` is not general enough" error when this
    // handler's future is checked against axum's `Handler` bound.
    (&mut *tx)
        .execute(sqlx::raw_sql(SEED_SQL))
        .await
        .map_err(|e| {
            tracing::error!("Failed to apply seed data: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    tx.commit().await?;

    tracing::info!("Database reset to seed state");

    Ok(Json(serde_json::json!({"message": "Database reset successfully."})))
}
