//! End-to-end runs of the binary against a mock Serverspace API
//!
//! The mock server lives on the test's runtime while the binary runs as a
//! blocking child process, hence the multi-threaded runtime.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn s2ctl(dir: &TempDir, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("s2ctl").unwrap();
    cmd.env("S2CTL_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG")
        .env("S2CTL_APIKEY", "04test-key")
        .env("S2CTL_HOST", server.uri());
    cmd
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_create_without_wait_prints_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/servers"))
        .and(header("X-API-KEY", "04test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "lt1"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = s2ctl(&dir, &server)
        .args([
            "server",
            "create",
            "--name",
            "web",
            "--location",
            "am2",
            "--image",
            "Debian-12-X64",
            "--cpu",
            "1",
            "--ram",
            "1G",
            "--volume",
            "25G",
            "--public-network",
            "50",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output), json!({"task_id": "lt1"}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["ram_mb"], json!(1024));
    assert_eq!(body["volumes"], json!([{"name": "boot", "size_mb": 25600}]));
    assert_eq!(body["networks"], json!([{"bandwidth_mbps": 50}]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_create_with_wait_prints_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "lt1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/lt1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task": {"id": "lt1", "is_completed": "Completed", "server_id": "abc"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {"name": "web", "id": "abc", "cpu": 1, "state": "Active"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = s2ctl(&dir, &server)
        .args([
            "server",
            "create",
            "--name",
            "web",
            "--location",
            "am2",
            "--image",
            "Debian-12-X64",
            "--cpu",
            "1",
            "--ram",
            "1024",
            "--volume",
            "25G",
            "--public-network",
            "50",
            "--wait",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let printed = stdout_json(&output);
    assert_eq!(printed["id"], json!("abc"));
    let keys: Vec<&String> = printed.as_object().unwrap().keys().collect();
    assert_eq!(keys[0], "id");
    assert_eq!(keys[1], "name");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unauthorized_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"errors": [{"message": "bad key"}]})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    s2ctl(&dir, &server)
        .args(["project", "show"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Can't log in. Check your API key."));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_not_found_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/l1s404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    s2ctl(&dir, &server)
        .args(["server", "get", "l1s404"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("object not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_empty_list_prints_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ssh-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ssh_keys": []})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    s2ctl(&dir, &server)
        .args(["ssh-key", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_images_prints_distinct_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": [
            {"id": "Ubuntu-22.04-X64", "location_id": "am2"},
            {"id": "Debian-12-X64", "location_id": "am2"},
            {"id": "Ubuntu-22.04-X64", "location_id": "nj3"}
        ]})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = s2ctl(&dir, &server)
        .args(["images", "-o", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        stdout_json(&output),
        json!(["Debian-12-X64", "Ubuntu-22.04-X64"])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_query_filters_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": [
            {"id": "l1s1", "name": "web", "state": "Active"},
            {"id": "l1s2", "name": "db", "state": "Stopped"}
        ]})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = s2ctl(&dir, &server)
        .args(["server", "list", "-o", "json", "-q", "[?state=='Active'].id"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stdout_json(&output), json!(["l1s1"]));
}
