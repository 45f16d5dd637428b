//! Decides whether a remote check is due or cached results may be served

use chrono::{DateTime, Local, NaiveDateTime};

/// Format used for `last_checked_timestamp`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a new remote check should run now
pub fn should_check(last_checked: Option<&str>, frequency_days: i64, force: bool) -> bool {
    should_check_at(
        last_checked,
        frequency_days,
        force,
        Local::now().naive_local(),
    )
}

/// Same as [`should_check`] with an explicit notion of "now"
///
/// A timestamp that cannot be parsed is treated as unknown and makes the
/// check due. One that lies in the future has not aged at all yet.
pub fn should_check_at(
    last_checked: Option<&str>,
    frequency_days: i64,
    force: bool,
    now: NaiveDateTime,
) -> bool {
    if force {
        return true;
    }

    let Some(last) = last_checked.and_then(parse_timestamp) else {
        return true;
    };

    (now - last).num_days() >= frequency_days
}

/// Render a timestamp in the stored format
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time in the stored format
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}
