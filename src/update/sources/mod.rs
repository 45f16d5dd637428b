//! Release source implementations for looking up the latest release

pub mod github;
pub mod proxy;

pub use github::GitHubReleaseSource;
pub use proxy::ProxyReleaseSource;
