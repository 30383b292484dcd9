/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::io::Write;

use assert_cmd::Command;
use common::{GENERATE_PATH, RecordBuilder, generate_url, mock_endpoint, ndjson_body};
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_news-classifier"));
    cmd.env_remove("LLM_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classify news articles"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("parse"));
}

#[test]
fn test_cli_version() {
    cli().arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_no_command_prints_help() {
    cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("Use --help for usage information").not());
}

#[test]
fn test_cli_classify_without_url_fails() {
    cli()
        .args(["classify", "Some article"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LLM_URL environment variable not set"));
}

#[test]
fn test_cli_classify_empty_text_fails_before_request() {
    cli()
        .env("LLM_URL", "http://127.0.0.1:9/api/generate")
        .args(["classify", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to classify"));
}

#[test]
fn test_cli_classify_missing_file_fails() {
    cli()
        .env("LLM_URL", "http://127.0.0.1:9/api/generate")
        .args(["classify", "--file", "/nonexistent/article.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_cli_classify_text_conflicts_with_file() {
    cli().args(["classify", "text", "--file", "a.txt"]).assert().failure();
}

#[test]
fn test_cli_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{\"a\":1}}").unwrap();
    writeln!(file, "not json").unwrap();
    write!(file, "{{\"b\":\"ü\"}}").unwrap();
    file.flush().unwrap();

    cli()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"a\":1}"))
        .stdout(predicate::str::contains("{\"b\":\"ü\"}"))
        .stdout(predicate::str::contains("not json").not())
        .stderr(predicate::str::contains("Skipped invalid line 2"))
        .stderr(predicate::str::contains("Parsed 2 records (1 skipped)"));
}

#[test]
fn test_cli_parse_stdin() {
    cli()
        .arg("parse")
        .write_stdin("{\"n\":1}\n{\"n\":2}\n")
        .assert()
        .success()
        .stdout("{\"n\":1}\n{\"n\":2}\n")
        .stderr(predicate::str::contains("Parsed 2 records (0 skipped)"));
}

#[test]
fn test_cli_parse_missing_file_fails() {
    cli()
        .args(["parse", "/nonexistent/body.ndjson"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open NDJSON file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_classify_against_endpoint() {
    let body = ndjson_body(&[RecordBuilder::completed("Business").total_duration(5_000_000_000)]);
    let server = mock_endpoint(200, &body).await;
    let url = generate_url(&server);

    tokio::task::spawn_blocking(move || {
        cli()
            .env("LLM_URL", &url)
            .args(["classify", "Stocks rose sharply today"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Business"))
            .stdout(predicate::str::contains("Classified in 05sec"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_classify_from_stdin_with_url_flag() {
    let body = ndjson_body(&[RecordBuilder::completed("Sports")]);
    let server = mock_endpoint(200, &body).await;
    let url = generate_url(&server);

    tokio::task::spawn_blocking(move || {
        cli()
            .args(["classify", "--url", &url])
            .write_stdin("Final score 3-1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Sports"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_classify_json_output() {
    let body = ndjson_body(&[RecordBuilder::completed("Tech").total_duration(42)]);
    let server = mock_endpoint(200, &body).await;
    let url = generate_url(&server);

    tokio::task::spawn_blocking(move || {
        cli()
            .env("LLM_URL", &url)
            .args(["classify", "--json", "New phone released"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"done\":true"))
            .stdout(predicate::str::contains("\"response\":\"Tech\""))
            .stdout(predicate::str::contains("\"total_duration\":42"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_classify_reports_remote_error() {
    let body = ndjson_body(&[RecordBuilder::new().error("model not loaded")]);
    let server = mock_endpoint(500, &body).await;
    let url = generate_url(&server);

    tokio::task::spawn_blocking(move || {
        cli()
            .env("LLM_URL", &url)
            .args(["classify", "article"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Classification failed"))
            .stderr(predicate::str::contains("model not loaded"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_classify_sends_article_untrimmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_json(json!({
            "model": "newsClassifier",
            "prompt": "Classify this article:   Final score 3-1\n",
            "stream": false
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ndjson_body(&[RecordBuilder::completed("Sports")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let url = generate_url(&server);

    tokio::task::spawn_blocking(move || {
        cli()
            .args(["classify", "--url", &url])
            .write_stdin("  Final score 3-1\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Sports"));
    })
    .await
    .unwrap();
}
