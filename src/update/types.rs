use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CHECK_FREQUENCY_DAYS;
use crate::update::error::FailureKind;

/// Latest release as reported by a release source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release tag, e.g. `v1.4.0`
    pub latest_version: String,
    /// Display name of the release
    pub latest_version_name: String,
    pub release_url: String,
    pub repo_url: String,
}

/// Update information owned and persisted by the host.
///
/// The engine mutates this record in place; the host is expected to store
/// it between sessions and feed it back on the next check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCheckResult {
    /// How many days a successful check stays valid
    pub check_frequency_days: i64,
    /// One-shot override of the cache window, cleared after every check
    pub force_update_check: bool,
    pub update_available: bool,
    pub current_version: String,
    pub latest_version: String,
    pub latest_version_name: String,
    /// When the last successful check happened
    pub last_checked_timestamp: String,
    pub repo_url: String,
    pub releases_url: String,
}

impl Default for UpdateCheckResult {
    fn default() -> Self {
        Self {
            check_frequency_days: DEFAULT_CHECK_FREQUENCY_DAYS,
            force_update_check: false,
            update_available: false,
            current_version: String::new(),
            latest_version: String::new(),
            latest_version_name: String::new(),
            last_checked_timestamp: String::new(),
            repo_url: String::new(),
            releases_url: String::new(),
        }
    }
}

impl UpdateCheckResult {
    pub fn last_checked(&self) -> Option<&str> {
        if self.last_checked_timestamp.is_empty() {
            None
        } else {
            Some(&self.last_checked_timestamp)
        }
    }
}

/// What a single engine invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Owner, slug or endpoint missing; nothing was checked
    NotConfigured,
    /// The cache window is still open; the record was left untouched
    Cached,
    /// A full check completed
    Checked { update_available: bool },
    /// The check failed and was recorded as "no update available"
    Failed(FailureKind),
}
