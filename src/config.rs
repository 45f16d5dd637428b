use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default number of days a successful check stays valid
pub const DEFAULT_CHECK_FREQUENCY_DAYS: i64 = 3;

/// Timeout for a single release lookup in milliseconds (5 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 5_000;

// =============================================================================
// Endpoints
// =============================================================================

/// Default base URL for the GitHub REST API
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Base URL for human-facing repository pages
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// User agent sent with every lookup
pub const USER_AGENT: &str = concat!("update-checker/", env!("CARGO_PKG_VERSION"));

/// Wire protocol used to look up the latest release
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// `GET {endpoint}/repos/{owner}/{slug}/releases/latest`
    #[default]
    GitHub,
    /// `POST {endpoint}/getUpdateInfo`
    Proxy,
}

/// Basic-auth credentials for the GitHub API
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// Identity and lookup settings supplied by the host for one check
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCheckConfig {
    /// Name used to correlate log lines with the calling application
    pub app_name: String,
    pub owner: String,
    pub repo_slug: String,
    /// API base for [`Protocol::GitHub`], proxy root for [`Protocol::Proxy`]
    pub endpoint: String,
    pub current_version: String,
    pub protocol: Protocol,
    pub credentials: Option<Credentials>,
}

impl Default for UpdateCheckConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            owner: String::new(),
            repo_slug: String::new(),
            endpoint: DEFAULT_GITHUB_API_BASE.to_string(),
            current_version: String::new(),
            protocol: Protocol::default(),
            credentials: None,
        }
    }
}

impl UpdateCheckConfig {
    /// Whether enough is known to attempt a lookup.
    ///
    /// An incomplete configuration means "nothing to check", not an error.
    pub fn is_complete(&self) -> bool {
        let has = |s: &str| !s.trim().is_empty();

        let base = has(&self.repo_slug) && has(&self.endpoint);
        match self.protocol {
            Protocol::GitHub => base && has(&self.owner),
            Protocol::Proxy => base,
        }
    }

    /// Human-facing repository page
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", GITHUB_WEB_BASE, self.owner, self.repo_slug)
    }

    /// Human-facing releases page
    pub fn releases_url(&self) -> String {
        format!("{}/releases", self.repo_url())
    }
}

/// Returns the path to the data directory for update-checker.
/// Uses $XDG_DATA_HOME/update-checker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/update-checker,
/// or ./update-checker if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the persisted check result.
pub fn state_path() -> PathBuf {
    data_dir().join("state.json")
}

/// Returns the directory log files are written to.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("update-checker")
}
