//! Presentation-neutral update notices
//!
//! Hosts render notices however they like (status line, desktop
//! notification, web banner) by implementing [`NotificationSink`].

use crate::update::types::UpdateCheckResult;

/// What to tell the user when an update is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub title: String,
    pub message: String,
    /// Where the user can get the update
    pub url: String,
}

impl UpdateNotice {
    /// Build a notice from a result record, or `None` when there is nothing to announce
    pub fn from_result(result: &UpdateCheckResult) -> Option<Self> {
        if !result.update_available {
            return None;
        }

        let title = if result.latest_version_name.is_empty() {
            "Update available".to_string()
        } else {
            format!("Update available: {}", result.latest_version_name)
        };

        Some(Self {
            title,
            message: format!(
                "You can update from {} to {}",
                result.current_version, result.latest_version
            ),
            url: result.releases_url.clone(),
        })
    }
}

/// Presentation layer consuming update notices
pub trait NotificationSink {
    fn notify(&mut self, notice: &UpdateNotice);
}

/// Forward the notice for `result` to `sink`, if there is one.
///
/// Returns whether anything was announced.
pub fn announce<S: NotificationSink + ?Sized>(result: &UpdateCheckResult, sink: &mut S) -> bool {
    match UpdateNotice::from_result(result) {
        Some(notice) => {
            sink.notify(&notice);
            true
        }
        None => false,
    }
}
