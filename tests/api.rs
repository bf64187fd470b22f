//! Integration tests for the link store HTTP API.
//!
//! Each test binds the real router on an ephemeral port over a temporary
//! data directory and drives it with `reqwest` and the vault client.

use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use link_vault::client::{HttpLinkApi, LinkApi, VaultController};
use link_vault::config::paths::VaultPaths;
use link_vault::crypto::MasterPassword;
use link_vault::models::{EncryptedLink, LinkId, UserId, DECRYPTION_FAILED};
use link_vault::server::{self, AppState};
use link_vault::storage::Storage;

// ========================================
// Test Helpers
// ========================================

struct TestServer {
    addr: SocketAddr,
    dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn paths(&self) -> VaultPaths {
        VaultPaths::with_base_dir(self.dir.path().to_path_buf())
    }
}

async fn spawn_server() -> TestServer {
    let dir = TempDir::new().expect("temp dir");
    let storage = Storage::new(VaultPaths::with_base_dir(dir.path().to_path_buf()))
        .expect("storage");
    storage.load_all().expect("load");

    let app = server::router(AppState::new(storage), 64 * 1024);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer { addr, dir }
}

async fn add_row(client: &reqwest::Client, server: &TestServer, user: &str, tag: &str) -> i64 {
    let res = client
        .post(server.url("/links"))
        .json(&json!({
            "userId": user,
            "encryptedTitle": format!("title-{}", tag),
            "encryptedUrl": format!("url-{}", tag),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Link added successfully");
    body["id"].as_i64().unwrap()
}

// ========================================
// Raw HTTP contract
// ========================================

#[tokio::test]
async fn health_reports_ok() {
    let server = spawn_server().await;
    let body: Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_requires_user_id() {
    let server = spawn_server().await;

    let res = reqwest::get(server.url("/links")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "userId is required");
}

#[tokio::test]
async fn list_unknown_user_is_empty() {
    let server = spawn_server().await;

    let res = reqwest::get(server.url("/links?userId=nobody")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn add_then_list_newest_first() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let first = add_row(&client, &server, "alice", "a").await;
    let second = add_row(&client, &server, "alice", "b").await;
    add_row(&client, &server, "bob", "c").await;
    assert!(second > first);

    let rows: Vec<Value> = client
        .get(server.url("/links?userId=alice"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], second);
    assert_eq!(rows[0]["user_id"], "alice");
    assert_eq!(rows[0]["encrypted_title"], "title-b");
    assert_eq!(rows[1]["encrypted_url"], "url-a");
}

#[tokio::test]
async fn add_rejects_missing_fields() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/links"))
        .json(&json!({ "userId": "alice", "encryptedTitle": "t" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "encryptedUrl is required");

    let res = client
        .post(server.url("/links"))
        .json(&json!({ "userId": "", "encryptedTitle": "t", "encryptedUrl": "u" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_rejects_malformed_body() {
    let server = spawn_server().await;

    let res = reqwest::Client::new()
        .post(server.url("/links"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_validates_parameters() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client.delete(server.url("/links?userId=alice")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.delete(server.url("/links?id=1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(server.url("/links?id=abc&userId=alice"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "id must be an integer");
}

#[tokio::test]
async fn delete_is_scoped_to_owner() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let id = add_row(&client, &server, "alice", "a").await;

    // Wrong owner: success message, row untouched
    let res = client
        .delete(server.url(&format!("/links?id={}&userId=bob", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Link deleted successfully");

    let rows: Vec<Value> = client
        .get(server.url("/links?userId=alice"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let res = client
        .delete(server.url(&format!("/links?id={}&userId=alice", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let rows: Vec<Value> = client
        .get(server.url("/links?userId=alice"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn whole_collection_replace() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    add_row(&client, &server, "alice", "a").await;
    add_row(&client, &server, "bob", "b").await;

    let all: Vec<EncryptedLink> = client
        .get(server.url("/links/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let kept: Vec<EncryptedLink> = all
        .into_iter()
        .filter(|l| l.user_id.as_str() == "bob")
        .collect();
    let res = client
        .put(server.url("/links/all"))
        .json(&kept)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let all: Vec<EncryptedLink> = client
        .get(server.url("/links/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id.as_str(), "bob");
}

#[tokio::test]
async fn invalid_replace_keeps_previous_rows() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    add_row(&client, &server, "alice", "a").await;

    let res = client
        .put(server.url("/links/all"))
        .json(&json!([
            { "id": 1, "user_id": "", "encrypted_title": "t", "encrypted_url": "u" }
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let all: Vec<Value> = client
        .get(server.url("/links/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["user_id"], "alice");
}

#[tokio::test]
async fn replace_with_out_of_range_id_is_rejected() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    add_row(&client, &server, "alice", "a").await;

    let res = client
        .put(server.url("/links/all"))
        .json(&json!([
            { "id": i64::MAX, "user_id": "alice", "encrypted_title": "t", "encrypted_url": "u" }
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(server.url("/links?userId=alice"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rows: Vec<Value> = res.json().await.unwrap();
    assert_eq!(rows.len(), 1);

    // The store still accepts writes afterwards
    assert_eq!(add_row(&client, &server, "alice", "b").await, 2);
}

#[tokio::test]
async fn storage_failure_returns_generic_error() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    // A directory in the temp file's place makes every write fail
    let blocker = server.paths().data_dir().join("links.json.tmp");
    std::fs::create_dir_all(&blocker).unwrap();

    let res = client
        .post(server.url("/links"))
        .json(&json!({
            "userId": "alice",
            "encryptedTitle": "t",
            "encryptedUrl": "u",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = res.text().await.unwrap();
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({ "error": "Failed to add link" }));
    assert!(!body.contains("links.json"));
    assert!(!body.contains(&server.dir.path().display().to_string()));

    std::fs::remove_dir(&blocker).unwrap();
    assert_eq!(add_row(&client, &server, "alice", "a").await, 1);
}

// ========================================
// Client over HTTP
// ========================================

#[tokio::test]
async fn http_api_round_trip() {
    let server = spawn_server().await;
    let api = HttpLinkApi::new(server.base()).unwrap();
    let user = UserId::new("carol");

    let id = api.add(&user, "sealed-title", "sealed-url").await.unwrap();
    let rows = api.list(&user).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);

    api.delete(id, &user).await.unwrap();
    assert!(api.list(&user).await.unwrap().is_empty());

    // Deleting a missing row is not an error
    api.delete(LinkId::new(999), &user).await.unwrap();
}

#[tokio::test]
async fn http_api_surfaces_validation_errors() {
    let server = spawn_server().await;
    let api = HttpLinkApi::new(server.base()).unwrap();

    let err = api.add(&UserId::new("carol"), "", "u").await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("encryptedTitle is required"));
}

#[tokio::test]
async fn controller_end_to_end() {
    let server = spawn_server().await;

    let mut vault = VaultController::new(HttpLinkApi::new(server.base()).unwrap());
    vault.set_password(MasterPassword::new("abc123")).await.unwrap();
    vault.add_link("Bank", "https://bank.example").await.unwrap();

    vault.fetch_links().await.unwrap();
    assert_eq!(vault.links().len(), 1);
    assert_eq!(vault.links()[0].title, "Bank");

    // The server only ever saw ciphertext
    let all: Vec<Value> = reqwest::get(server.url("/links/all"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let stored = all[0].to_string();
    assert!(!stored.contains("Bank"));
    assert!(!stored.contains("bank.example"));
    assert!(!stored.contains("abc123"));

    // A different password sees a different, empty vault
    vault.set_password(MasterPassword::new("wrong")).await.unwrap();
    assert!(vault.links().is_empty());

    vault.logout();
    assert!(vault.needs_password());
}

#[tokio::test]
async fn controller_shows_sentinel_for_foreign_ciphertext() {
    let server = spawn_server().await;

    let mut owner = VaultController::new(HttpLinkApi::new(server.base()).unwrap());
    owner.set_password(MasterPassword::new("abc123")).await.unwrap();
    owner.add_link("Bank", "https://bank.example").await.unwrap();
    let row = owner.encrypted_links()[0].clone();

    // Re-file the owner's ciphertext under another password's identifier
    let mut intruder = VaultController::new(HttpLinkApi::new(server.base()).unwrap());
    intruder.set_password(MasterPassword::new("wrong")).await.unwrap();
    let intruder_id = intruder.user_id().unwrap().clone();
    HttpLinkApi::new(server.base())
        .unwrap()
        .add(&intruder_id, &row.encrypted_title, &row.encrypted_url)
        .await
        .unwrap();

    intruder.fetch_links().await.unwrap();
    assert_eq!(intruder.links().len(), 1);
    assert_eq!(intruder.links()[0].title, DECRYPTION_FAILED);
    assert_eq!(intruder.links()[0].url, DECRYPTION_FAILED);
}

#[tokio::test]
async fn controller_reports_unreachable_server() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut vault = VaultController::new(HttpLinkApi::new(format!("http://{}", addr)).unwrap());
    vault.set_password(MasterPassword::new("abc123")).await.unwrap();

    assert!(vault.is_unlocked());
    assert!(vault.links().is_empty());
    let notes = vault.drain_notifications();
    assert!(notes.iter().any(|n| n.is_error()));
}
