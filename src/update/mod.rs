//! Update checking for an embedding application
//!
//! Decides whether a newer release of the host application has been
//! published, without querying the upstream service more often than the
//! configured frequency allows.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CacheGate  │◀────│   Engine    │────▶│VersionCode  │
//! │ (due/cache) │     │(orchestrate)│     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Sources   │
//!                     │github, proxy│
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache_gate`]: Cache-expiry decision based on the last successful check
//! - [`engine`]: The single entry point hosts call
//! - [`error`]: Parse and lookup failure taxonomy
//! - [`notice`]: Turning a result record into a user-facing notice
//! - [`source`]: Release source trait
//! - [`sources`]: GitHub API and proxy implementations
//! - [`types`]: Result record, release info and check outcome
//! - [`version_code`]: Version parsing and comparison

pub mod cache_gate;
pub mod engine;
pub mod error;
pub mod notice;
pub mod source;
pub mod sources;
pub mod types;
pub mod version_code;

pub use engine::UpdateCheckEngine;
pub use types::{CheckOutcome, ReleaseInfo, UpdateCheckResult};
