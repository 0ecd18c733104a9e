// tests/api_tests.rs

use ca_assessment::{config::Config, routes, state::AppState};
use serde_json::{Value, json};
use tempfile::TempDir;

const INSTRUCTOR_SECRET: &str = "ca-trainer-2025";

/// Correct keys of the built-in bank, in question order.
const ANSWER_KEY: [&str; 15] = [
    "b", "c", "b", "b", "b", "a", "b", "b", "b", "a", "b", "b", "b", "b", "b",
];

struct TestApp {
    address: String,
    responses_dir: TempDir,
}

/// Spawns the app on a random port with its store in a fresh temp directory.
async fn spawn_app() -> TestApp {
    let responses_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        responses_dir: responses_dir.path().to_path_buf(),
        question_bank_path: None,
        instructor_secret: INSTRUCTOR_SECRET.to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        pass_threshold: 10,
        session_ttl_minutes: 45,
        bind_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        invalid_settings: Vec::new(),
    };

    let state = AppState::from_config(config).expect("Failed to build state");
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        responses_dir,
    }
}

fn unique_email() -> String {
    format!("ca_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn start_session(client: &reqwest::Client, address: &str, email: &str) -> String {
    let response = client
        .post(format!("{}/api/quiz/sessions", address))
        .json(&json!({
            "name": "Test Student",
            "email": email,
            "phone": "9876543210"
        }))
        .send()
        .await
        .expect("Failed to start session");
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    body["session_id"].as_str().expect("session_id missing").to_string()
}

/// Answers every question, getting the first `correct` of them right.
async fn answer_all(client: &reqwest::Client, address: &str, session_id: &str, correct: usize) {
    for (i, key) in ANSWER_KEY.iter().enumerate() {
        let answer = if i < correct {
            key.to_string()
        } else if *key == "a" {
            "d".to_string()
        } else {
            "a".to_string()
        };
        let response = client
            .put(format!(
                "{}/api/quiz/sessions/{}/answers/{}",
                address,
                session_id,
                i + 1
            ))
            .json(&json!({ "answer": answer }))
            .send()
            .await
            .expect("Failed to record answer");
        assert_eq!(response.status().as_u16(), 200);
    }
}

async fn instructor_token(client: &reqwest::Client, address: &str) -> String {
    let body: Value = client
        .post(format!("{}/api/instructor/login", address))
        .json(&json!({ "secret": INSTRUCTOR_SECRET }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");
    body["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn questions_hide_the_answer_key() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/quiz/questions", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total_questions"], 15);
    assert_eq!(body["pass_threshold"], 10);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 15);
    assert!(questions.iter().all(|q| q.get("correct").is_none()));
    assert_eq!(questions[0]["difficulty"], "Medium");
}

#[tokio::test]
async fn start_session_fails_validation() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/quiz/sessions", app.address))
        .json(&json!({
            "name": "Test Student",
            "email": "not-an-email",
            "phone": "9876543210"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn invalid_option_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = start_session(&client, &app.address, &unique_email()).await;

    let response = client
        .put(format!(
            "{}/api/quiz/sessions/{}/answers/1",
            app.address, session_id
        ))
        .json(&json!({ "answer": "e" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn incomplete_submission_is_blocked() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = start_session(&client, &app.address, &unique_email()).await;

    client
        .put(format!(
            "{}/api/quiz/sessions/{}/answers/1",
            app.address, session_id
        ))
        .json(&json!({ "answer": "b" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/quiz/sessions/{}/submit", app.address, session_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["missing"].as_array().unwrap().len(), 14);

    // Nothing was written.
    let stored = std::fs::read_dir(app.responses_dir.path()).unwrap().count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn full_attempt_is_scored_and_saved() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    let session_id = start_session(&client, &app.address, &email).await;

    answer_all(&client, &app.address, &session_id, 10).await;

    let progress: Value = client
        .get(format!("{}/api/quiz/sessions/{}", app.address, session_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(progress["progress"]["answered"], 15);

    let response = client
        .post(format!("{}/api/quiz/sessions/{}/submit", app.address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let result: Value = response.json().await.unwrap();
    assert_eq!(result["score"], 10);
    assert_eq!(result["passed"], true);
    assert_eq!(result["band"], "satisfactory");
    assert_eq!(result["saved"], true);
    assert_eq!(result["review"].as_array().unwrap().len(), 15);
    assert_eq!(result["review"][14]["is_correct"], false);

    let file_name = result["file_name"].as_str().unwrap();
    assert!(file_name.starts_with(&format!("responses_{}_", email)));
    assert!(app.responses_dir.path().join(file_name).exists());

    // The session is closed after submission.
    let again = client
        .post(format!("{}/api/quiz/sessions/{}/submit", app.address, session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn save_failure_still_returns_score() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let session_id = start_session(&client, &app.address, &unique_email()).await;
    answer_all(&client, &app.address, &session_id, 15).await;

    // Replace the store directory with a plain file so writes fail.
    let dir = app.responses_dir.path().to_path_buf();
    std::fs::remove_dir_all(&dir).unwrap();
    std::fs::write(&dir, "not a directory").unwrap();

    let result: Value = client
        .post(format!("{}/api/quiz/sessions/{}/submit", app.address, session_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["score"], 15);
    assert_eq!(result["band"], "excellent");
    assert_eq!(result["saved"], false);
    assert!(result["save_error"].is_string());

    std::fs::remove_file(&dir).unwrap();
}

#[tokio::test]
async fn instructor_login_rejects_wrong_secret() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/instructor/login", app.address))
        .json(&json!({ "secret": "guess" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn report_requires_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/instructor/report", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .get(format!("{}/api/instructor/report", app.address))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn empty_store_gives_empty_report() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = instructor_token(&client, &app.address).await;

    let report: Value = client
        .get(format!("{}/api/instructor/report", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report["overall"]["count"], 0);
    assert_eq!(report["overall"]["average_percentage"], 0.0);
    assert!(report["per_topic"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn instructor_report_flow() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for correct in [15, 9] {
        let session_id = start_session(&client, &app.address, &unique_email()).await;
        answer_all(&client, &app.address, &session_id, correct).await;
        let response = client
            .post(format!("{}/api/quiz/sessions/{}/submit", app.address, session_id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    // A corrupt unit must not blank the dashboard.
    std::fs::write(
        app.responses_dir.path().join("responses_broken_20250101_000000.json"),
        "{ truncated",
    )
    .unwrap();

    let token = instructor_token(&client, &app.address).await;
    let report: Value = client
        .get(format!("{}/api/instructor/report", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report["overall"]["count"], 2);
    assert_eq!(report["overall"]["pass_count"], 1);
    assert_eq!(report["overall"]["average_percentage"], 80.0);
    assert_eq!(report["overall"]["max_percentage"], 100.0);
    assert_eq!(report["per_student"].as_array().unwrap().len(), 2);
    assert_eq!(report["warnings"][0]["source"], "store");

    let topic_total: u64 = report["per_topic"]
        .as_object()
        .unwrap()
        .values()
        .map(|t| t["total_count"].as_u64().unwrap())
        .sum();
    assert_eq!(topic_total, 30);

    let csv = client
        .get(format!("{}/api/instructor/export/topics.csv", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(csv.status().as_u16(), 200);
    assert!(
        csv.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let body = csv.text().await.unwrap();
    assert!(body.starts_with("Topic,Correct,Total,Percentage"));

    let students = client
        .get(format!("{}/api/instructor/export/students.csv", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(students.lines().count(), 3);

    let missing = client
        .get(format!("{}/api/instructor/export/grades.csv", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}
