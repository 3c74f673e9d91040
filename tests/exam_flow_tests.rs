// tests/exam_flow_tests.rs

use progresso_backend::{config::Config, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL and the pool. The in-memory database lives inside
/// the pool's single connection, so store assertions must reuse this pool.
async fn spawn_app() -> (String, SqlitePool) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        seed_on_start: false,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

async fn create_user(client: &reqwest::Client, address: &str) -> i64 {
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let body: serde_json::Value = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({"email": email}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["id"].as_i64().unwrap()
}

async fn create_exam(client: &reqwest::Client, address: &str, name: &str) -> i64 {
    let body: serde_json::Value = client
        .post(&format!("{}/api/exams", address))
        .json(&serde_json::json!({"name": name, "year": 2024}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn exams_paging_works() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    for name in ["Exam A", "Exam B", "Exam C"] {
        create_exam(&client, &address, name).await;
    }

    // Act / Assert: first page
    let page: Vec<serde_json::Value> = client
        .get(&format!("{}/api/exams?skip=0&limit=2", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["name"], "Exam A");

    // Second page
    let page: Vec<serde_json::Value> = client
        .get(&format!("{}/api/exams?skip=2", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "Exam C");

    // limit=0 returns nothing rather than everything
    let page: Vec<serde_json::Value> = client
        .get(&format!("{}/api/exams?limit=0", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn exam_partial_update_touches_only_sent_fields() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(&format!("{}/api/exams", address))
        .json(&serde_json::json!({
            "name": "Midterm",
            "year": 2024,
            "province": "Ha Noi",
            "rating": 3
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // Act: only the rating changes
    let response = client
        .put(&format!("{}/api/exams/{}", address, id))
        .json(&serde_json::json!({"rating": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Assert
    let fetched: serde_json::Value = client
        .get(&format!("{}/api/exams/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["rating"], 5);
    assert_eq!(fetched["name"], "Midterm");
    assert_eq!(fetched["year"], 2024);
    assert_eq!(fetched["province"], "Ha Noi");
}

#[tokio::test]
async fn question_with_answers_flow() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let exam_id = create_exam(&client, &address, "Question exam").await;

    // Act: create a question with three options
    let response = client
        .post(&format!("{}/api/questions", address))
        .json(&serde_json::json!({
            "exam_id": exam_id,
            "content": "2 + 2 = ?",
            "type": "single",
            "answers": [
                {"content": "3"},
                {"content": "4", "is_correct": true},
                {"content": "5"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let question_id = body["id"].as_i64().unwrap();

    // Assert: listing returns the question with its answers attached
    let all: Vec<serde_json::Value> = client
        .get(&format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["type"], "single");
    assert_eq!(all[0]["answers"].as_array().unwrap().len(), 3);

    // Filtered by exam
    let by_exam: Vec<serde_json::Value> = client
        .get(&format!("{}/api/questions/exam/{}", address, exam_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_exam.len(), 1);
    assert_eq!(by_exam[0]["id"].as_i64(), Some(question_id));

    // Single fetch
    let single: serde_json::Value = client
        .get(&format!("{}/api/questions/{}", address, question_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let correct: Vec<&serde_json::Value> = single["answers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["is_correct"] == true)
        .collect();
    assert_eq!(correct.len(), 1);
    assert_eq!(correct[0]["content"], "4");

    // Delete removes the answers too
    let deleted = client
        .delete(&format!("{}/api/questions/{}", address, question_id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE question_id = ?")
        .bind(question_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn question_requires_a_correct_answer() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: no option is marked correct
    let response = client
        .post(&format!("{}/api/questions", address))
        .json(&serde_json::json!({
            "content": "Unanswerable",
            "type": "single",
            "answers": [{"content": "A"}, {"content": "B"}]
        }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);

    // Empty option list is rejected too
    let response = client
        .post(&format!("{}/api/questions", address))
        .json(&serde_json::json!({
            "content": "No options",
            "type": "single",
            "answers": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submissions_flow() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let user_id = create_user(&client, &address).await;
    let exam_id = create_exam(&client, &address, "Graded exam").await;

    // Act: hand in an attempt
    let response = client
        .post(&format!("{}/api/submissions", address))
        .json(&serde_json::json!({"user_id": user_id, "exam_id": exam_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let id = body["id"].as_i64().unwrap();

    // Assert: listed for the user, upload time set server-side
    let mine: Vec<serde_json::Value> = client
        .get(&format!("{}/api/submissions/by-user/{}", address, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine[0]["grade"].is_null());
    assert!(!mine[0]["upload_time"].is_null());

    // Grade it, then attach feedback separately
    let graded = client
        .put(&format!("{}/api/submissions/{}", address, id))
        .json(&serde_json::json!({"grade": 8.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(graded.status().as_u16(), 200);

    let commented = client
        .put(&format!("{}/api/submissions/{}", address, id))
        .json(&serde_json::json!({"feedback": "Review question 2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(commented.status().as_u16(), 200);

    let fetched: serde_json::Value = client
        .get(&format!("{}/api/submissions/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["grade"].as_f64(), Some(8.5));
    assert_eq!(fetched["feedback"], "Review question 2");
}

#[tokio::test]
async fn schedules_by_user_is_chronological() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let user_id = create_user(&client, &address).await;
    let other_id = create_user(&client, &address).await;

    for (uid, title, date) in [
        (user_id, "Later revision", "2024-06-10"),
        (user_id, "Early mock exam", "2024-06-01"),
        (other_id, "Someone else's plan", "2024-06-05"),
    ] {
        let resp = client
            .post(&format!("{}/api/schedules", address))
            .json(&serde_json::json!({
                "user_id": uid,
                "title": title,
                "type": "study",
                "event_date": date,
                "start_time": "08:00:00"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let entries: Vec<serde_json::Value> = client
        .get(&format!("{}/api/schedules/by-user/{}", address, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Early mock exam");
    assert_eq!(entries[1]["title"], "Later revision");
}

#[tokio::test]
async fn lessons_completed_flow() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let user_id = create_user(&client, &address).await;

    let topic: serde_json::Value = client
        .post(&format!("{}/api/topics", address))
        .json(&serde_json::json!({"name": "History"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let lesson: serde_json::Value = client
        .post(&format!("{}/api/lessons", address))
        .json(&serde_json::json!({
            "topic_id": topic["id"].as_i64().unwrap(),
            "title": "The Bronze Age"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let lesson_id = lesson["id"].as_i64().unwrap();

    // Act: no timestamp sent, the server fills it in
    let response = client
        .post(&format!("{}/api/lessons-completed", address))
        .json(&serde_json::json!({"user_id": user_id, "lesson_id": lesson_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    // Assert
    let mine: Vec<serde_json::Value> = client
        .get(&format!("{}/api/lessons-completed/by-user/{}", address, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["lesson_id"].as_i64(), Some(lesson_id));
    assert!(!mine[0]["completed_at"].is_null());
}
