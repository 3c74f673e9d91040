// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        exams, lessons, lessons_completed, questions, quizlets, reset, schedules,
        submission_records, submissions, topics, users,
    },
    state::AppState,
};

/// Assembles the main application router.
///
/// * Nests one sub-router per resource under `/api`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool + config).
pub fn create_router(state: AppState) -> Router {
    // The API is consumed by browser frontends served from anywhere.
    let cors = CorsLayer::permissive();

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let topic_routes = Router::new()
        .route("/", get(topics::list_topics).post(topics::create_topic))
        .route(
            "/{id}",
            get(topics::get_topic)
                .put(topics::update_topic)
                .delete(topics::delete_topic),
        );

    let lesson_routes = Router::new()
        .route("/", get(lessons::list_lessons).post(lessons::create_lesson))
        .route(
            "/{id}",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        );

    let exam_routes = Router::new()
        .route("/", get(exams::list_exams).post(exams::create_exam))
        .route(
            "/{id}",
            get(exams::get_exam)
                .put(exams::update_exam)
                .delete(exams::delete_exam),
        );

    let question_routes = Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/exam/{exam_id}", get(questions::get_questions_by_exam))
        .route(
            "/{id}",
            get(questions::get_question).delete(questions::delete_question),
        );

    let quizlet_routes = Router::new()
        .route(
            "/",
            get(quizlets::list_quizlets).post(quizlets::create_quizlet),
        )
        .route(
            "/by-lesson/{lesson_id}",
            get(quizlets::get_quizlets_by_lesson),
        )
        .route(
            "/{id}",
            get(quizlets::get_quizlet)
                .put(quizlets::update_quizlet)
                .delete(quizlets::delete_quizlet),
        );

    let schedule_routes = Router::new()
        .route(
            "/",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route("/by-user/{user_id}", get(schedules::get_schedules_by_user))
        .route(
            "/{id}",
            get(schedules::get_schedule)
                .put(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        );

    let submission_routes = Router::new()
        .route(
            "/",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route(
            "/by-user/{user_id}",
            get(submissions::get_submissions_by_user),
        )
        .route(
            "/{id}",
            get(submissions::get_submission)
                .put(submissions::update_submission)
                .delete(submissions::delete_submission),
        );

    let submission_record_routes = Router::new()
        .route(
            "/",
            get(submission_records::list_submission_records)
                .post(submission_records::create_submission_record),
        )
        .route(
            "/batch",
            post(submission_records::batch_upsert_submission_records),
        )
        .route(
            "/{id}",
            get(submission_records::get_submission_record)
                .put(submission_records::update_submission_record)
                .delete(submission_records::delete_submission_record),
        );

    let lessons_completed_routes = Router::new()
        .route(
            "/",
            get(lessons_completed::list_lessons_completed)
                .post(lessons_completed::create_lesson_completed),
        )
        .route(
            "/by-user/{user_id}",
            get(lessons_completed::get_lessons_completed_by_user),
        )
        .route(
            "/{id}",
            get(lessons_completed::get_lesson_completed)
                .put(lessons_completed::update_lesson_completed)
                .delete(lessons_completed::delete_lesson_completed),
        );

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/topics", topic_routes)
        .nest("/api/lessons", lesson_routes)
        .nest("/api/exams", exam_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/quizlets", quizlet_routes)
        .nest("/api/schedules", schedule_routes)
        .nest("/api/submissions", submission_routes)
        .nest("/api/submission-records", submission_record_routes)
        .nest("/api/lessons-completed", lessons_completed_routes)
        .route("/api/reset-db", post(reset::reset_database))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
