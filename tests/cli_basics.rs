use assert_cmd::{cargo}; // handy crate for testing CLIs
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with a clean environment: no colors, no key, no user config file.
fn portfoliobot() -> Command {
    let mut cmd = cargo::cargo_bin_cmd!();
    cmd.env("NO_COLOR", "1")
        .env("HOME", std::env::temp_dir().join("portfoliobot-no-home"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("PORTFOLIOBOT_MODEL")
        .env_remove("PORTFOLIOBOT_ENDPOINT");
    cmd
}

#[test]
fn prints_help() {
    portfoliobot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn prints_version() {
    portfoliobot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn prints_profile_sections() {
    portfoliobot()
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mohamed Elmugtaba"))
        .stdout(predicate::str::contains("== Experience =="))
        .stdout(predicate::str::contains("NATIONAL RIBAT UNIVERSITY"));
}

#[test]
fn lists_numbered_projects() {
    portfoliobot()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1) Covid-19 Single-Cell Analysis"))
        .stdout(predicate::str::contains(" 4) Data Visualisation with ggplot2"));
}

#[test]
fn insight_without_model_uses_dummy_reply() {
    portfoliobot()
        .args(["--no-model", "insight", "scarf"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[DUMMY REPLY] Suggest a future technical direction for the project: \
             \"Memory-Efficient scRNA-seq Analysis (Scarf)\" which uses Python | Scarf | Zarr | Dask.",
        ));
}

#[test]
fn insight_rejects_unknown_project() {
    portfoliobot()
        .args(["--no-model", "insight", "quantum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project title matches"));
}

#[test]
fn insight_survives_unreachable_endpoint() {
    portfoliobot()
        .args(["--endpoint", "http://127.0.0.1:1", "insight", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error generating response."));
}

#[test]
fn chat_appends_replies_in_order() {
    portfoliobot()
        .args(["--no-model", "chat"])
        .write_stdin("A\n   \nB\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant: Hello. I'm Mohamed's Digital Assistant."))
        .stdout(
            predicate::str::is_match(
                r"(?s)assistant: \[DUMMY REPLY\] A\n.*assistant: \[DUMMY REPLY\] B\n",
            )
            .unwrap(),
        );
}

#[test]
fn chat_survives_unreachable_endpoint() {
    portfoliobot()
        .args(["--endpoint", "http://127.0.0.1:1", "chat"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant: Error generating response."));
}

#[tokio::test(flavor = "multi_thread")]
async fn insight_shows_no_response_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = server.uri();
    tokio::task::spawn_blocking(move || {
        portfoliobot()
            .args([
                "--endpoint",
                endpoint.as_str(),
                "--model",
                "test-model",
                "--api-key",
                "test-key",
                "insight",
                "ggplot",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("AI SUGGESTION\nNo response generated.\n"));
    })
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"Data Visualisation with ggplot2\""));
    assert!(prompt.contains("R | RStudio | ggplot2 | Tidyverse"));
}
