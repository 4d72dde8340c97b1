//! Integration tests for the `orangebox` CLI binary.
//!
//! Argument parsing, help output, completions and config handling run
//! without a backend; resource commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `orangebox` binary with env isolation.
///
/// Clears all `ORANGEBOX_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn orangebox_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("orangebox");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ORANGEBOX_PROFILE")
        .env_remove("ORANGEBOX_API_URL")
        .env_remove("ORANGEBOX_OUTPUT")
        .env_remove("ORANGEBOX_INSECURE")
        .env_remove("ORANGEBOX_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run against a mock backend, off the async test thread.
async fn run_against(server: &MockServer, home: &Path, args: &[&str]) -> Output {
    let api_url = format!("{}/api", server.uri());
    let mut cmd = orangebox_cmd(home);
    cmd.arg("--api-url").arg(api_url).args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn product_json(id: i64, name: &str) -> Value {
    json!({
        "id": id, "name": name, "price": "9.50", "description": "",
        "stock": 4, "provider_id": 1, "provider_name": "Acme"
    })
}

fn page_json(rows: &[Value]) -> Value {
    json!({
        "data": rows,
        "pagination": {
            "per_page": 5,
            "from": 1,
            "to": rows.len(),
            "total": rows.len(),
            "links": { "next_page_url": null, "prev_page_url": null }
        }
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = orangebox_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("products")
                .and(predicate::str::contains("providers"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orangebox"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = orangebox_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_list_without_backend_config() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .args(["products", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn test_unsupported_page_size_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .args(["products", "list", "--per-page", "7"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("5, 10 or 20"));
}

#[test]
fn test_add_requires_fields() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .args(["providers", "add"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    orangebox_cmd(home.path())
        .args([
            "config",
            "init",
            "--profile",
            "staging",
            "--api-url",
            "http://10.0.0.9/api",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration written"));

    let output = orangebox_cmd(home.path())
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let cfg: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["default_profile"], "staging");
    assert_eq!(cfg["profiles"]["staging"]["api_url"], "http://10.0.0.9/api");
}

#[test]
fn test_unknown_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    orangebox_cmd(home.path())
        .args(["--profile", "prod", "providers", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'prod' not found"));
}

// ── Resource commands against a mock backend ────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_forwards_query_and_keeps_order() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("sort", "name"))
        .and(query_param("direction", "desc"))
        .and(query_param("search", "an"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[
            product_json(9, "Spanner"),
            product_json(3, "Anvil"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        home.path(),
        &[
            "-o", "plain", "products", "list", "--page", "2", "-n", "10", "--sort", "name",
            "--direction", "desc", "--search", "an",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "9\n3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_table_output_prints_page_summary() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[
            product_json(3, "Anvil"),
            product_json(7, "Bolt"),
        ])))
        .mount(&server)
        .await;

    let output = run_against(&server, home.path(), &["products", "list"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Anvil") && stdout.contains("9.50"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Showing 1 to 2 of 2 entries"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_sort_field_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, home.path(), &["providers", "list", "--sort", "price"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("expected one of"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_product_exits_not_found() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/products/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let output = run_against(&server, home.path(), &["products", "get", "99"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Product '99' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_provider_posts_fields() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/providers"))
        .and(body_json(json!({
            "name": "Globex", "address": "2 Road", "phone": "556", "description": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 12, "name": "Globex", "address": "2 Road",
                      "phone": "556", "description": "" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        home.path(),
        &[
            "-o", "json", "providers", "add", "-F", "name=Globex", "-F", "address=2 Road", "-F",
            "phone=556",
        ],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(created["id"], 12);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Provider added successfully"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_issues_delete() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/products/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, home.path(), &["products", "delete", "7", "--yes"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Product 7 deleted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_terminal_or_yes_is_refused() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, home.path(), &["products", "delete", "7"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("requires confirmation"));
}
