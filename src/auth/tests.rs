//! Tests for the auth module

use super::*;
use crate::config::{ConfigStore, FileConfigStore, MemoryConfigStore, TapConfig};
use crate::error::Error;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TapConfig {
    TapConfig {
        email: Some("ops@example.com".to_string()),
        password: Some("hunter2".to_string()),
        location_key: Some("ne1234".to_string()),
        base_url: Some(server.uri()),
        ..Default::default()
    }
}

fn login_body(token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "code": 200,
        "message": "Successful",
        "data": {
            "companyName": "Acme",
            "token": {"jwt_token": token, "token_type": "bearer", "expires_in": expires_in}
        }
    })
}

async fn mount_login(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/access/token"))
        .and(body_string_contains("email=ops%40example.com"))
        .and(body_string_contains("password=hunter2"))
        .and(body_string_contains("location_key=ne1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(token, 86_400)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_logs_in_and_persists() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-1", 1).await;

    let store = Arc::new(MemoryConfigStore::new(config_for(&server)));
    let manager = TokenManager::new(config_for(&server), store.clone());
    assert!(!manager.is_valid().await);

    let before = Utc::now().timestamp();
    let credential = manager.refresh().await.unwrap();
    assert_eq!(credential.access_token, "jwt-1");
    assert_eq!(credential.expires_in, 86_400);
    assert!(credential.created_at >= before);
    assert!(manager.is_valid().await);

    let saved = store.snapshot().await;
    assert_eq!(store.save_count(), 1);
    assert_eq!(saved.access_token.as_deref(), Some("jwt-1"));
    assert_eq!(saved.expires_in, 86_400);
    assert_eq!(saved.created_at, credential.created_at);
    assert_eq!(saved.email.as_deref(), Some("ops@example.com"));
}

#[tokio::test]
async fn test_valid_credential_is_reused() {
    let server = MockServer::start().await;
    mount_login(&server, "unused", 0).await;

    let mut config = config_for(&server);
    config.set_credential(&Credential::new("cached", 3600, Utc::now().timestamp()));
    let store = Arc::new(MemoryConfigStore::new(config.clone()));
    let manager = TokenManager::new(config, store.clone());

    assert_eq!(manager.ensure_fresh().await.unwrap(), "cached");
    assert_eq!(manager.ensure_fresh().await.unwrap(), "cached");
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_expired_credential_triggers_single_login() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-new", 1).await;

    let mut config = config_for(&server);
    // Issued two hours ago with a one hour lifetime
    config.set_credential(&Credential::new(
        "stale",
        3600,
        Utc::now().timestamp() - 7200,
    ));
    let manager = TokenManager::new(config.clone(), Arc::new(MemoryConfigStore::new(config)));

    assert_eq!(manager.ensure_fresh().await.unwrap(), "jwt-new");
    // Second call reuses the refreshed token
    assert_eq!(manager.ensure_fresh().await.unwrap(), "jwt-new");
}

#[tokio::test]
async fn test_auth_header() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-h", 1).await;

    let config = config_for(&server);
    let manager = TokenManager::new(config.clone(), Arc::new(MemoryConfigStore::new(config)));

    let headers = manager.auth_header().await.unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(
        headers.get("Authorization"),
        Some(&"Bearer jwt-h".to_string())
    );
}

#[tokio::test]
async fn test_apply_sets_bearer() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-apply", 1).await;

    let config = config_for(&server);
    let manager = TokenManager::new(config.clone(), Arc::new(MemoryConfigStore::new(config)));

    let client = reqwest::Client::new();
    let req = manager
        .apply(client.get("https://example.com/orders"))
        .await
        .unwrap();
    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer jwt-apply"
    );
}

#[tokio::test]
async fn test_login_rejected_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid credentials"}"#),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let store = Arc::new(MemoryConfigStore::new(config.clone()));
    let manager = TokenManager::new(config, store.clone());

    let err = manager.ensure_fresh().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
    assert!(err.to_string().contains("Invalid credentials"));
    assert!(err.to_string().contains("401"));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_login_missing_token_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/access/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"token": {"token_type": "bearer"}}})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let manager = TokenManager::new(config.clone(), Arc::new(MemoryConfigStore::new(config)));

    let err = manager.refresh().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
    assert!(err.to_string().contains("Malformed login response"));
}

#[tokio::test]
async fn test_login_endpoint_unreachable() {
    let config = TapConfig {
        base_url: Some("http://127.0.0.1:1".to_string()),
        ..Default::default()
    };
    let manager = TokenManager::new(config.clone(), Arc::new(MemoryConfigStore::new(config)));

    assert!(matches!(manager.refresh().await, Err(Error::Auth { .. })));
}

#[tokio::test]
async fn test_refreshed_credential_survives_reload() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-disk", 1).await;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        serde_json::to_string(&config_for(&server)).unwrap(),
    )
    .unwrap();

    let store: Arc<dyn ConfigStore> = Arc::new(FileConfigStore::new(&config_path));
    let manager = TokenManager::from_store(store).await.unwrap();
    manager.refresh().await.unwrap();

    let reloaded = TokenManager::from_store(Arc::new(FileConfigStore::new(&config_path)))
        .await
        .unwrap();
    assert!(reloaded.is_valid().await);
    assert_eq!(reloaded.credential().await.access_token, "jwt-disk");
}

#[tokio::test]
async fn test_concurrent_callers_share_one_login() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-shared", 1).await;

    let config = config_for(&server);
    let store = Arc::new(MemoryConfigStore::new(config.clone()));
    let manager = Arc::new(TokenManager::new(config, store.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.ensure_fresh().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "jwt-shared");
    }
    assert_eq!(store.save_count(), 1);
}
