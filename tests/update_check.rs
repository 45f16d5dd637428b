//! End-to-end update checks against local release servers

mod helper;

use mockito::{Matcher, Server};
use serde_json::json;

use helper::{
    SHORT_TIMEOUT, app_config, engine_with_timeout, github_release_body, spawn_silent_server,
};
use update_checker::config::{FETCH_TIMEOUT_MS, Protocol};
use update_checker::update::error::FailureKind;
use update_checker::update::{CheckOutcome, UpdateCheckResult};

const LATEST_PATH: &str = "/repos/gusztavj/mesh-sync/releases/latest";

fn default_timeout() -> std::time::Duration {
    std::time::Duration::from_millis(FETCH_TIMEOUT_MS)
}

#[tokio::test]
async fn newer_release_is_reported_as_available() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(github_release_body("v1.1.0", "Spring release"))
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::GitHub, default_timeout());
    let config = app_config(&server.url(), Protocol::GitHub, "1.0.0");
    let mut result = UpdateCheckResult::default();

    let outcome = engine.check(&config, &mut result).await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        CheckOutcome::Checked {
            update_available: true
        }
    );
    assert!(result.update_available);
    assert_eq!(result.latest_version, "1.1.0");
    assert_eq!(result.latest_version_name, "Spring release");
    assert_eq!(result.current_version, "1.0.0");
    assert_eq!(
        result.releases_url,
        "https://github.com/gusztavj/mesh-sync/releases"
    );
}

#[tokio::test]
async fn same_release_is_not_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_body(github_release_body("v2.0.0", "2.0"))
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::GitHub, default_timeout());
    let config = app_config(&server.url(), Protocol::GitHub, "2.0.0");
    let mut result = UpdateCheckResult::default();

    engine.check(&config, &mut result).await;

    assert!(!result.update_available);
    assert_eq!(result.latest_version, "2.0.0");
    assert!(!result.last_checked_timestamp.is_empty());
}

#[tokio::test]
async fn timeout_keeps_previous_timestamp_and_clears_force() {
    let endpoint = spawn_silent_server().await;

    let engine = engine_with_timeout(Protocol::GitHub, SHORT_TIMEOUT);
    let config = app_config(&endpoint, Protocol::GitHub, "1.0.0");
    let mut result = UpdateCheckResult {
        force_update_check: true,
        update_available: true,
        last_checked_timestamp: "2024-01-01 08:00:00".to_string(),
        ..Default::default()
    };

    let outcome = engine.check(&config, &mut result).await;

    assert_eq!(outcome, CheckOutcome::Failed(FailureKind::Timeout));
    assert!(!result.update_available);
    assert!(!result.force_update_check);
    assert_eq!(result.last_checked_timestamp, "2024-01-01 08:00:00");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Bind and drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let engine = engine_with_timeout(Protocol::GitHub, default_timeout());
    let config = app_config(&format!("http://{addr}"), Protocol::GitHub, "1.0.0");
    let mut result = UpdateCheckResult::default();

    let outcome = engine.check(&config, &mut result).await;

    assert_eq!(outcome, CheckOutcome::Failed(FailureKind::Transport));
    assert!(result.last_checked_timestamp.is_empty());
}

#[tokio::test]
async fn rate_limited_api_is_absorbed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LATEST_PATH)
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::GitHub, default_timeout());
    let config = app_config(&server.url(), Protocol::GitHub, "1.0.0");
    let mut result = UpdateCheckResult::default();

    let outcome = engine.check(&config, &mut result).await;

    assert_eq!(outcome, CheckOutcome::Failed(FailureKind::HttpStatus));
    assert!(!result.update_available);
}

#[tokio::test]
async fn repeated_checks_within_window_hit_upstream_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST_PATH)
        .with_status(200)
        .with_body(github_release_body("v1.1.0", "Spring release"))
        .expect(1)
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::GitHub, default_timeout());
    let config = app_config(&server.url(), Protocol::GitHub, "1.0.0");
    let mut result = UpdateCheckResult::default();

    engine.check(&config, &mut result).await;
    let after_first = result.clone();
    let second = engine.check(&config, &mut result).await;

    mock.assert_async().await;
    assert_eq!(second, CheckOutcome::Cached);
    assert_eq!(result, after_first);
}

#[tokio::test]
async fn proxy_protocol_reports_update() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/getUpdateInfo")
        .match_body(Matcher::PartialJson(json!({
            "appInfo": { "repoSlug": "mesh-sync", "currentVersion": "1.0.0" },
            "forceUpdateCheck": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "repository": {
                    "latestVersionName": "Spring release",
                    "latestVersion": "v1.1.0-beta",
                    "releaseUrl": "https://example.com/mesh-sync/releases",
                    "repoUrl": "https://example.com/mesh-sync"
                },
                "updateAvailable": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::Proxy, default_timeout());
    let config = app_config(&server.url(), Protocol::Proxy, "1.0.0");
    let mut result = UpdateCheckResult::default();

    let outcome = engine.check(&config, &mut result).await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        CheckOutcome::Checked {
            update_available: true
        }
    );
    assert_eq!(result.latest_version, "1.1.0");
    assert_eq!(result.releases_url, "https://example.com/mesh-sync/releases");
    assert_eq!(result.repo_url, "https://example.com/mesh-sync");
}

#[tokio::test]
async fn proxy_update_flag_is_recomputed_locally() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/getUpdateInfo")
        .with_status(200)
        .with_body(
            json!({
                "repository": {
                    "latestVersionName": "1.0",
                    "latestVersion": "1.0.0",
                    "releaseUrl": "r",
                    "repoUrl": "u"
                },
                "updateAvailable": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let engine = engine_with_timeout(Protocol::Proxy, default_timeout());
    let config = app_config(&server.url(), Protocol::Proxy, "1.0.0");
    let mut result = UpdateCheckResult::default();

    engine.check(&config, &mut result).await;

    assert!(!result.update_available);
}

#[tokio::test]
async fn proxy_timeout_is_absorbed() {
    let endpoint = spawn_silent_server().await;

    let engine = engine_with_timeout(Protocol::Proxy, SHORT_TIMEOUT);
    let config = app_config(&endpoint, Protocol::Proxy, "1.0.0");
    let mut result = UpdateCheckResult {
        force_update_check: true,
        ..Default::default()
    };

    let outcome = engine.check(&config, &mut result).await;

    assert_eq!(outcome, CheckOutcome::Failed(FailureKind::Timeout));
    assert!(!result.force_update_check);
    assert!(result.last_checked_timestamp.is_empty());
}
