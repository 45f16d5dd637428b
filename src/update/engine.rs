//! Update check orchestration
//!
//! Runs the cache gate, the release lookup and the version comparison, and
//! records the outcome in the host's [`UpdateCheckResult`]. Failures never
//! escape: they are logged, classified and recorded as "no update available".

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{Protocol, UpdateCheckConfig};
use crate::update::cache_gate;
use crate::update::error::LookupError;
use crate::update::source::ReleaseSource;
use crate::update::sources::{GitHubReleaseSource, ProxyReleaseSource};
use crate::update::types::{CheckOutcome, ReleaseInfo, UpdateCheckResult};
use crate::update::version_code::{VersionTuple, is_newer};

/// Checks for newer releases on demand.
///
/// Holds no state besides its release source; everything that must survive
/// between calls lives in the caller's [`UpdateCheckResult`].
pub struct UpdateCheckEngine {
    source: Arc<dyn ReleaseSource>,
}

/// Release data that passed version parsing
struct VerifiedRelease {
    info: ReleaseInfo,
    latest: VersionTuple,
    current: VersionTuple,
}

/// Clears the force-check flag when dropped, whichever way the check ends
struct ForceCheckReset<'a>(&'a mut UpdateCheckResult);

impl Drop for ForceCheckReset<'_> {
    fn drop(&mut self) {
        self.0.force_update_check = false;
    }
}

impl Deref for ForceCheckReset<'_> {
    type Target = UpdateCheckResult;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl DerefMut for ForceCheckReset<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl UpdateCheckEngine {
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self { source }
    }

    /// Create an engine talking to the HTTP source for `protocol`
    pub fn for_protocol(protocol: Protocol) -> Result<Self, LookupError> {
        let source: Arc<dyn ReleaseSource> = match protocol {
            Protocol::GitHub => Arc::new(GitHubReleaseSource::new()?),
            Protocol::Proxy => Arc::new(ProxyReleaseSource::new()?),
        };
        Ok(Self::new(source))
    }

    pub fn protocol(&self) -> Protocol {
        self.source.protocol()
    }

    /// Check for updates, or keep serving cached information.
    ///
    /// The record is left untouched when the cache window is still open. On
    /// success every informational field and the timestamp are rewritten; on
    /// failure only `update_available` is reset. `force_update_check` is
    /// always cleared, including when the returned future is dropped early.
    pub async fn check(
        &self,
        config: &UpdateCheckConfig,
        result: &mut UpdateCheckResult,
    ) -> CheckOutcome {
        let mut record = ForceCheckReset(result);
        self.run(config, &mut record).await
    }

    async fn run(
        &self,
        config: &UpdateCheckConfig,
        result: &mut UpdateCheckResult,
    ) -> CheckOutcome {
        let app = config.app_name.as_str();

        if !config.is_complete() {
            debug!("{}: update check not configured, skipping", app);
            return CheckOutcome::NotConfigured;
        }

        if !cache_gate::should_check(
            result.last_checked(),
            result.check_frequency_days,
            result.force_update_check,
        ) {
            debug!(
                "{}: last checked at {}, serving cached update info",
                app, result.last_checked_timestamp
            );
            return CheckOutcome::Cached;
        }

        match self.lookup(config, result.force_update_check).await {
            Ok(release) => {
                let update_available = is_newer(&release.latest, &release.current);

                result.update_available = update_available;
                result.current_version = release.current.to_string();
                result.latest_version = release.latest.to_string();
                result.latest_version_name = release.info.latest_version_name;
                result.repo_url = release.info.repo_url;
                result.releases_url = release.info.release_url;
                result.last_checked_timestamp = cache_gate::now_timestamp();

                info!(
                    "{}: installed {}, latest {} (update available: {})",
                    app, result.current_version, result.latest_version, update_available
                );
                CheckOutcome::Checked { update_available }
            }
            Err(e) => {
                result.update_available = false;
                warn!("{}", failure_message(app, &e));
                CheckOutcome::Failed(e.kind())
            }
        }
    }

    async fn lookup(
        &self,
        config: &UpdateCheckConfig,
        force_update_check: bool,
    ) -> Result<VerifiedRelease, LookupError> {
        let current = VersionTuple::parse(&config.current_version)?;
        let info = self
            .source
            .fetch_latest_release(config, force_update_check)
            .await?;
        let latest = VersionTuple::parse(&info.latest_version)?;

        Ok(VerifiedRelease {
            info,
            latest,
            current,
        })
    }
}

fn failure_message(app: &str, e: &LookupError) -> String {
    format!("{}: error during version check ({}): {}", app, e.kind(), e)
}
