//! Release source trait for looking up the latest published release

#[cfg(test)]
use mockall::automock;

use crate::config::{Protocol, UpdateCheckConfig};
use crate::update::error::LookupError;
use crate::update::types::ReleaseInfo;

/// Trait for fetching the latest release of an application
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Returns the wire protocol this implementation speaks
    fn protocol(&self) -> Protocol;

    /// Performs a single lookup of the latest release
    ///
    /// # Arguments
    /// * `config` - Identity, endpoint and installed version of the application
    /// * `force_update_check` - Whether the host asked to bypass caching
    ///
    /// # Returns
    /// * `Ok(ReleaseInfo)` - The latest release
    /// * `Err(LookupError)` - Classified failure; implementations never retry
    async fn fetch_latest_release(
        &self,
        config: &UpdateCheckConfig,
        force_update_check: bool,
    ) -> Result<ReleaseInfo, LookupError>;
}
