//! Update-info proxy release source
//!
//! The proxy sits in front of the release API so that clients do not need
//! credentials of their own and the upstream rate limit is shared.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, Protocol, USER_AGENT, UpdateCheckConfig};
use crate::update::error::{LookupError, body_snippet};
use crate::update::source::ReleaseSource;
use crate::update::types::ReleaseInfo;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateInfoRequest<'a> {
    app_info: AppInfo<'a>,
    force_update_check: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppInfo<'a> {
    repo_slug: &'a str,
    current_version: &'a str,
}

/// Response from `POST {proxy}/getUpdateInfo`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateInfoResponse {
    repository: RepositoryInfo,
    #[serde(default)]
    update_available: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryInfo {
    latest_version_name: String,
    latest_version: String,
    release_url: String,
    repo_url: String,
}

/// Release source backed by an update-info proxy service
pub struct ProxyReleaseSource {
    client: reqwest::Client,
}

impl ProxyReleaseSource {
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
impl ReleaseSource for ProxyReleaseSource {
    fn protocol(&self) -> Protocol {
        Protocol::Proxy
    }

    async fn fetch_latest_release(
        &self,
        config: &UpdateCheckConfig,
        force_update_check: bool,
    ) -> Result<ReleaseInfo, LookupError> {
        let url = format!("{}/getUpdateInfo", config.endpoint.trim_end_matches('/'));

        let payload = UpdateInfoRequest {
            app_info: AppInfo {
                repo_slug: &config.repo_slug,
                current_version: &config.current_version,
            },
            force_update_check,
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Update proxy returned status {}: {}", status, url);
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
                body: body_snippet(&body, 160),
            });
        }

        let body = response.text().await?;
        let info: UpdateInfoResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse update proxy response: {}", e);
            LookupError::MalformedBody(e.to_string())
        })?;

        if let Some(available) = info.update_available {
            debug!(
                "Proxy reports updateAvailable={} for {}",
                available, config.repo_slug
            );
        }

        let repository = info.repository;
        Ok(ReleaseInfo {
            latest_version: repository.latest_version,
            latest_version_name: repository.latest_version_name,
            release_url: repository.release_url,
            repo_url: repository.repo_url,
        })
    }
}
