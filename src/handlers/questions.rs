// src/handlers/questions.rs

use std::collections::HashMap;

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
    models::question::{
        Answer, AnswerOut, CreateQuestionRequest, Question, QuestionWithAnswers,
    },
};

/// Builds the client-facing shape: each question carrying its answer options.
fn attach_answers(questions: Vec<Question>, answers: Vec<Answer>) -> Vec<QuestionWithAnswers> {
    let mut by_question: HashMap<i64, Vec<AnswerOut>> = HashMap::new();
    for ans in answers {
        by_question.entry(ans.question_id).or_default().push(AnswerOut {
            id: ans.id,
            content: ans.content,
            is_correct: ans.is_correct,
        });
    }

    questions
        .into_iter()
        .map(|q| {
            let answers = by_question.remove(&q.id).unwrap_or_default();
            QuestionWithAnswers {
                id: q.id,
                exam_id: q.exam_id,
                topic_id: q.topic_id,
                content: q.content,
                question_type: q.question_type,
                answers,
            }
        })
        .collect()
}

/// Creates a question together with its answer options in one transaction.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let question_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (exam_id, topic_id, content, type)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(payload.exam_id)
    .bind(payload.topic_id)
    .bind(&payload.content)
    .bind(&payload.question_type)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    for answer in &payload.answers {
        sqlx::query("INSERT INTO answers (question_id, content, is_correct) VALUES (?, ?, ?)")
            .bind(question_id)
            .bind(&answer.content)
            .bind(answer.is_correct)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create answer: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"id": question_id})),
    ))
}

/// Lists every question with its answers.
pub async fn list_questions(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, exam_id, topic_id, content, type FROM questions ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let answers = sqlx::query_as::<_, Answer>(
        "SELECT id, question_id, content, is_correct FROM answers ORDER BY id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(attach_answers(questions, answers)))
}

/// Lists the questions of one exam, each with its answers.
pub async fn get_questions_by_exam(
    State(pool): State<SqlitePool>,
    Path(exam_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, exam_id, topic_id, content, type FROM questions WHERE exam_id = ? ORDER BY id",
    )
    .bind(exam_id)
    .fetch_all(&pool)
    .await?;

    let answers = sqlx::query_as::<_, Answer>(
        r#"
        SELECT a.id, a.question_id, a.content, a.is_correct
        FROM answers a
        JOIN questions q ON a.question_id = q.id
        WHERE q.exam_id = ?
        ORDER BY a.id
        "#,
    )
    .bind(exam_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(attach_answers(questions, answers)))
}

pub async fn get_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = sqlx::query_as::<_, Question>(
        "SELECT id, exam_id, topic_id, content, type FROM questions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let answers = sqlx::query_as::<_, Answer>(
        "SELECT id, question_id, content, is_correct FROM answers WHERE question_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    let mut with_answers = attach_answers(vec![question], answers);

    // attach_answers keeps one entry per input question
    Ok(Json(with_answers.remove(0)))
}

/// Deletes a question and its answers in one transaction.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM answers WHERE question_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
