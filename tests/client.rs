mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use wiremock::MockServer;

use common::mount_token;
use yandex_cloud_client::resources::PageRequest;
use yandex_cloud_client::{Config, Error, YandexCloudClient};

#[test]
fn empty_oauth_token_is_authentication_error() {
    match YandexCloudClient::from_oauth_token("") {
        Err(Error::Authentication { message, .. }) => {
            assert_eq!(message, "OAuth token cannot be empty")
        }
        Err(other) => panic!("expected Error::Authentication, got {}", other),
        Ok(_) => panic!("expected Error::Authentication, got Ok"),
    }
}

#[test]
fn invalid_token_url_fails_fast() {
    let mut config = Config::new("y0_oauth");
    config.iam_token_url = "://not-a-valid-url".into();

    match YandexCloudClient::new(config) {
        Err(Error::Config(msg)) => assert!(msg.contains("Invalid IAM token URL")),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("expected invalid URL error"),
    }
}

#[test]
fn config_file_round_trips_into_client() {
    let cfg = json!({
        "oauth_token": "y0_from_file",
        "iam_token_url": "http://127.0.0.1:1/iam/v1/tokens",
        "timeout_secs": 5,
        "token_lifetime_secs": 3600,
        "refresh_margin_secs": 60
    });
    let mut cfg_path = PathBuf::from("target");
    fs::create_dir_all(&cfg_path).ok();
    cfg_path.push("client-config-file.json");
    fs::write(&cfg_path, serde_json::to_string(&cfg).unwrap()).unwrap();

    let config = Config::from_file(&cfg_path).expect("cfg file");
    let client = YandexCloudClient::new(config).expect("client");

    assert_eq!(client.oauth_token(), "y0_from_file");
    let policy = client.token_manager().policy();
    assert_eq!(policy.cache_ttl().as_secs(), 3540);
    assert_eq!(client.config().timeout().as_secs(), 5);
}

#[test]
fn missing_config_file_is_io_error() {
    let err = Config::from_file("target/does-not-exist.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn resources_share_one_token_manager() {
    let server = MockServer::start().await;
    mount_token(&server, "iam-shared").await;
    let client =
        YandexCloudClient::new(Config::new("y0_oauth").with_base_url(&server.uri())).unwrap();

    assert!(Arc::ptr_eq(&client.token_manager(), &client.clone().token_manager()));
    assert!(!client.token_manager().has_valid_cached_token().await);

    // Nothing is mounted for the list call itself, so it fails with 404 after the
    // token exchange has populated the shared cache.
    let err = client
        .clouds()
        .list(None, &PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    let manager = client.token_manager();
    assert!(manager.has_valid_cached_token().await);
    assert_eq!(manager.get_valid_token().await.unwrap(), "iam-shared");

    manager.invalidate().await;
    assert!(!client.token_manager().has_valid_cached_token().await);
}

#[tokio::test]
async fn huge_token_lifetime_returns_error_instead_of_panicking() {
    let server = MockServer::start().await;
    mount_token(&server, "iam-huge").await;
    let mut config = Config::new("y0_oauth").with_base_url(&server.uri());
    config.token_lifetime_secs = u64::MAX;
    let client = YandexCloudClient::new(config).expect("client");

    let manager = client.token_manager();
    let joined = tokio::spawn(async move { manager.get_valid_token().await }).await;

    let err = joined.expect("task must not panic").unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err:?}");
    assert!(!client.token_manager().has_valid_cached_token().await);
}
