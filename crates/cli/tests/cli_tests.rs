use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dbchat() -> Command {
    let mut cmd = Command::cargo_bin("dbchat").unwrap();
    cmd.env_remove("DBCHAT_API_BASE").env_remove("DBCHAT_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_cli_help() {
    dbchat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ask questions about your database in plain language"));
}

#[test]
fn test_cli_connect_help() {
    dbchat()
        .args(["connect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--type"));
}

#[test]
fn test_cli_rejects_unknown_database_type() {
    dbchat()
        .args(["test-connection", "--type", "oracle", "--database", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported database type"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_health_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "database": "not_connected",
            "llm": "connected"
        })))
        .mount(&server)
        .await;

    let base = format!("{}/api", server.uri());
    dbchat()
        .args(["--api-base", base.as_str(), "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"healthy\""))
        .stdout(predicate::str::contains("not_connected"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_ask_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    dbchat()
        .env("DBCHAT_API_BASE", format!("{}/api", server.uri()))
        .args(["ask", "how many users?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to send query"));
}

#[test]
fn test_cli_sqlite_without_path_is_rejected_locally() {
    dbchat()
        .args(["--api-base", "http://127.0.0.1:1/api", "connect", "--type", "sqlite3", "--database", "shop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file path is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_chat_session_over_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "schema": {
                "tables": [
                    {"name": "users", "columns": [], "row_count": 3},
                    {"name": "orders", "columns": [], "row_count": 9}
                ],
                "relationships": [],
                "summary": "2 tables"
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "answer": "There are 3 users.",
            "sql": "SELECT COUNT(*) AS n FROM users",
            "results": {"columns": ["n"], "rows": [{"n": 3}], "count": 1},
            "reasoning": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/api", server.uri());
    dbchat()
        .args(["--api-base", base.as_str(), "chat"])
        .write_stdin(":tables\nhow many users?\n:history\n:quit\nnever asked\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 tables)"))
        .stdout(predicate::str::contains("  users\n  orders\n"))
        .stdout(predicate::str::contains("There are 3 users."))
        .stdout(predicate::str::contains("SELECT COUNT(*) AS n FROM users"))
        .stdout(predicate::str::contains("how many users? (ok)"))
        .stdout(predicate::str::contains("unknown command").not())
        .stdout(predicate::str::contains("never asked").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_chat_ends_on_eof() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schema"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base = format!("{}/api", server.uri());
    dbchat()
        .args(["--api-base", base.as_str(), "chat"])
        .write_stdin(":schema\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("could not load schema: Failed to fetch schema"))
        .stdout(predicate::str::contains("no schema loaded"));
}
