// tests/api_tests.rs

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

    // 1. Create a pool. One connection, kept alive for the whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        seed_on_start: false,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

fn unique_email(prefix: &str) -> String {
    format!(
        "{}_{}@example.com",
        prefix,
        &uuid::Uuid::new_v4().to_string()[..8]
    )
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_user_works() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("u");

    // Act
    let response = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({
            "email": email,
            "full_name": "An Nguyen",
            "class_name": "12A1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let id = body["id"].as_i64().expect("Id not found");

    let fetched: serde_json::Value = client
        .get(&format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["email"], email.as_str());
    assert_eq!(fetched["class_name"], "12A1");
}

#[tokio::test]
async fn create_user_fails_validation() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send an invalid email address
    let response = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({
            "email": "not-an-email"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("dup");

    let first = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({"email": email}))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    // Act
    let second = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({"email": email}))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn update_user_replaces_whole_record() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("put");

    let created: serde_json::Value = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({
            "email": email,
            "full_name": "Before",
            "school": "Old School"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // Act: PUT without `school` clears it
    let response = client
        .put(&format!("{}/api/users/{}", address, id))
        .json(&serde_json::json!({
            "email": email,
            "full_name": "After"
        }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);

    let fetched: serde_json::Value = client
        .get(&format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["full_name"], "After");
    assert!(fetched["school"].is_null());
}

#[tokio::test]
async fn delete_user_works() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({"email": unique_email("del")}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // Act
    let response = client
        .delete(&format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 204);

    let fetched = client
        .get(&format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status().as_u16(), 404);
}

#[tokio::test]
async fn topics_crud_flow() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Create
    let created: serde_json::Value = client
        .post(&format!("{}/api/topics", address))
        .json(&serde_json::json!({"name": "Chemistry", "description": "Periodic table"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // Update
    let updated = client
        .put(&format!("{}/api/topics/{}", address, id))
        .json(&serde_json::json!({"name": "Organic Chemistry"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status().as_u16(), 200);

    // Read back
    let fetched: serde_json::Value = client
        .get(&format!("{}/api/topics/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["name"], "Organic Chemistry");
    assert!(fetched["description"].is_null());

    // List contains it
    let all: Vec<serde_json::Value> = client
        .get(&format!("{}/api/topics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.iter().any(|t| t["id"].as_i64() == Some(id)));

    // Delete
    let deleted = client
        .delete(&format!("{}/api/topics/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let gone = client
        .get(&format!("{}/api/topics/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn lesson_content_is_sanitized() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let topic: serde_json::Value = client
        .post(&format!("{}/api/topics", address))
        .json(&serde_json::json!({"name": "Maths"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let topic_id = topic["id"].as_i64().unwrap();

    // Act: content smuggles a script tag
    let created: serde_json::Value = client
        .post(&format!("{}/api/lessons", address))
        .json(&serde_json::json!({
            "topic_id": topic_id,
            "title": "Limits",
            "content": "<p>Intro to limits</p><script>alert(1)</script>"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // Assert: markup survives, script does not
    let fetched: serde_json::Value = client
        .get(&format!("{}/api/lessons/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let content = fetched["content"].as_str().unwrap();
    assert!(content.contains("<p>Intro to limits</p>"));
    assert!(!content.contains("script"));
    assert!(!content.contains("alert"));
}

#[tokio::test]
async fn quizlets_by_lesson_filters() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let topic: serde_json::Value = client
        .post(&format!("{}/api/topics", address))
        .json(&serde_json::json!({"name": "Physics"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let topic_id = topic["id"].as_i64().unwrap();

    let mut lesson_ids = Vec::new();
    for title in ["Waves", "Optics"] {
        let lesson: serde_json::Value = client
            .post(&format!("{}/api/lessons", address))
            .json(&serde_json::json!({"topic_id": topic_id, "title": title}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        lesson_ids.push(lesson["id"].as_i64().unwrap());
    }

    for (lesson_id, question) in [
        (lesson_ids[0], "What is a wavelength?"),
        (lesson_ids[0], "What is frequency?"),
        (lesson_ids[1], "What is refraction?"),
    ] {
        let resp = client
            .post(&format!("{}/api/quizlets", address))
            .json(&serde_json::json!({
                "lesson_id": lesson_id,
                "question": question,
                "answer": "See lesson notes"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let cards: Vec<serde_json::Value> = client
        .get(&format!("{}/api/quizlets/by-lesson/{}", address, lesson_ids[0]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c["lesson_id"].as_i64() == Some(lesson_ids[0])));
}

#[tokio::test]
async fn reset_db_restores_seed_state() {
    // Arrange: some data that the reset must wipe
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(&format!("{}/api/users", address))
        .json(&serde_json::json!({"email": unique_email("extra")}))
        .send()
        .await
        .unwrap();

    // Act
    let response = client
        .post(&format!("{}/api/reset-db", address))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);

    let users: Vec<serde_json::Value> = client
        .get(&format!("{}/api/users", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| {
        u["email"]
            .as_str()
            .is_some_and(|e| e.ends_with("@example.com"))
    }));

    let topics: Vec<serde_json::Value> = client
        .get(&format!("{}/api/topics", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(topics.iter().any(|t| t["name"] == "Mathematics"));
}
