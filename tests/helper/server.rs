//! Release server test utilities

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use update_checker::config::{Protocol, UpdateCheckConfig};
use update_checker::update::UpdateCheckEngine;
use update_checker::update::source::ReleaseSource;
use update_checker::update::sources::{GitHubReleaseSource, ProxyReleaseSource};

/// Timeout used against servers that never answer
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(200);

/// Config pointing at `endpoint` for the given protocol
pub fn app_config(endpoint: &str, protocol: Protocol, current_version: &str) -> UpdateCheckConfig {
    UpdateCheckConfig {
        app_name: "mesh-sync".to_string(),
        owner: "gusztavj".to_string(),
        repo_slug: "mesh-sync".to_string(),
        endpoint: endpoint.to_string(),
        current_version: current_version.to_string(),
        protocol,
        credentials: None,
    }
}

/// Engine using the HTTP source for `protocol` with a custom timeout
pub fn engine_with_timeout(protocol: Protocol, timeout: Duration) -> UpdateCheckEngine {
    let source: Arc<dyn ReleaseSource> = match protocol {
        Protocol::GitHub => Arc::new(GitHubReleaseSource::with_timeout(timeout).unwrap()),
        Protocol::Proxy => Arc::new(ProxyReleaseSource::with_timeout(timeout).unwrap()),
    };
    UpdateCheckEngine::new(source)
}

/// GitHub `releases/latest` body for `tag`
pub fn github_release_body(tag: &str, name: &str) -> String {
    serde_json::json!({ "tag_name": tag, "name": name }).to_string()
}

/// Start a server that accepts connections but never responds.
///
/// Returns its base URL. The listener task lives until the runtime shuts down.
pub async fn spawn_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{addr}")
}
