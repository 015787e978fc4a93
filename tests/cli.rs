use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: [&str; 4] = [
    "TEST_ZABBIX_URL",
    "TEST_ZABBIX_USER",
    "TEST_ZABBIX_PASSWORD",
    "TEST_ZABBIX_VERBOSE",
];

fn smoke() -> Command {
    let mut cmd = Command::cargo_bin("zabbix-smoke").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

async fn mock_method(server: &MockServer, name: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": name })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn healthy_server() -> MockServer {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "apiinfo.version",
        json!({"jsonrpc": "2.0", "result": "6.0.13", "id": 1}),
    )
    .await;
    mock_method(
        &server,
        "",
        json!({
            "jsonrpc": "2.0",
            "error": {"code": -32602, "message": "Invalid params.", "data": "Incorrect method \"\"."},
            "id": 2
        }),
    )
    .await;
    server
}

#[test]
fn test_missing_url_exits_before_checks() {
    smoke()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Set environment variables TEST_ZABBIX_URL (and optionally TEST_ZABBIX_USER and TEST_ZABBIX_PASSWORD)",
        ))
        .stdout(predicate::str::contains("check").not());
}

#[test]
fn test_empty_url_exits_before_checks() {
    smoke()
        .env("TEST_ZABBIX_URL", "")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_checks_pass_against_healthy_server() {
    let server = healthy_server().await;

    smoke()
        .env("TEST_ZABBIX_URL", server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("check bad_calls ... ok"))
        .stdout(predicate::str::contains("check version ... ok"))
        .stdout(predicate::str::contains("2 passed; 0 failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unexpected_version_fails() {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "apiinfo.version",
        json!({"jsonrpc": "2.0", "result": "7.0.0rc1", "id": 1}),
    )
    .await;
    mock_method(
        &server,
        "",
        json!({
            "jsonrpc": "2.0",
            "error": {"code": -32600, "message": "Invalid Request.", "data": ""},
            "id": null
        }),
    )
    .await;

    smoke()
        .env("TEST_ZABBIX_URL", server.uri())
        .assert()
        .failure()
        .stdout(predicate::str::contains("check bad_calls ... ok"))
        .stdout(predicate::str::contains(
            "check version ... FAILED: Unexpected version: 7.0.0rc1",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_is_fatal() {
    let server = healthy_server().await;
    mock_method(
        &server,
        "user.login",
        json!({
            "jsonrpc": "2.0",
            "error": {"code": -32500, "message": "Application error.", "data": "Incorrect user name or password or account is temporarily blocked."},
            "id": 2
        }),
    )
    .await;

    smoke()
        .env("TEST_ZABBIX_URL", server.uri())
        .env("TEST_ZABBIX_USER", "Admin")
        .env("TEST_ZABBIX_PASSWORD", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login as Admin failed"))
        .stdout(predicate::str::contains("check").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_logs_outbound_calls() {
    let server = healthy_server().await;

    smoke()
        .env("TEST_ZABBIX_URL", server.uri())
        .env("TEST_ZABBIX_VERBOSE", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains("apiinfo.version"));
}
