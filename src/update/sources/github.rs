//! GitHub Releases API release source

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::{FETCH_TIMEOUT_MS, Protocol, USER_AGENT, UpdateCheckConfig};
use crate::update::error::{LookupError, body_snippet};
use crate::update::source::ReleaseSource;
use crate::update::types::ReleaseInfo;

/// Response from `GET /repos/{owner}/{repo}/releases/latest`
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    name: Option<String>,
}

/// Release source backed by the GitHub Releases API
pub struct GitHubReleaseSource {
    client: reqwest::Client,
}

impl GitHubReleaseSource {
    /// Creates a source with the default lookup timeout
    pub fn new() -> Result<Self, LookupError> {
        Self::with_timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleaseSource {
    fn protocol(&self) -> Protocol {
        Protocol::GitHub
    }

    async fn fetch_latest_release(
        &self,
        config: &UpdateCheckConfig,
        _force_update_check: bool,
    ) -> Result<ReleaseInfo, LookupError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            config.endpoint.trim_end_matches('/'),
            config.owner,
            config.repo_slug
        );

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(credentials) = &config.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.token));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
                body: body_snippet(&body, 160),
            });
        }

        let body = response.text().await?;
        let release: Release = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            LookupError::MalformedBody(e.to_string())
        })?;

        let latest_version_name = release
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| release.tag_name.clone());

        Ok(ReleaseInfo {
            latest_version: release.tag_name,
            latest_version_name,
            release_url: config.releases_url(),
            repo_url: config.repo_url(),
        })
    }
}
