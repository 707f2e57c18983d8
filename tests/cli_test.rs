//! CLI-level tests exercising the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("ragchat")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("ragchat")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ragchat"));
}

#[tokio::test]
async fn test_health_command_against_mock_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "message": "Chatbot API is running"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("ragchat")
            .unwrap()
            .env("RAGCHAT_API_URL", uri)
            .arg("health")
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[tokio::test]
async fn test_history_command_prints_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/history/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"role": "user", "content": "Hello", "timestamp": "2024-01-15T10:30:00Z"}
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("ragchat")
            .unwrap()
            .env("RAGCHAT_API_URL", uri)
            .args(["history", "abc", "--json"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("\"content\": \"Hello\""));
}
