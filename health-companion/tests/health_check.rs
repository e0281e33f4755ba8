//! Spawns the full application on a random port with the mock provider.

use companion_core::config::{Config, EnvSource};
use health_companion::config::CompanionConfig;
use health_companion::services::providers::mock::MockTextProvider;
use health_companion::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let common = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let env = EnvSource::new(|key: &str| match key {
        "GOOGLE_API_KEY" => Some("test-api-key".to_string()),
        _ => None,
    });
    let config = CompanionConfig::from_env(common, &env).expect("Failed to load config");

    let app = Application::build_with_provider(config, Arc::new(MockTextProvider::new()), None)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "health-companion");
}

#[tokio::test]
async fn index_page_is_served() {
    let port = spawn_app().await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("AI Health Companion"));
}

#[tokio::test]
async fn invalid_host_is_a_config_error() {
    let common = Config {
        host: "not-an-ip".to_string(),
        port: 0,
    };
    let env = EnvSource::new(|key: &str| (key == "GOOGLE_API_KEY").then(|| "k".to_string()));
    let config = CompanionConfig::from_env(common, &env).unwrap();

    let result =
        Application::build_with_provider(config, Arc::new(MockTextProvider::new()), None).await;
    assert!(result.is_err());
}
