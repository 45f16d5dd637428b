//! Tolerant parsing and comparison of dotted numeric version strings
//!
//! Accepts tags such as `1.2.3`, `v2.0` or `v1.4.0-beta`. The optional `v`
//! prefix and any trailing qualifier are discarded; only the numeric run is
//! compared.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::update::error::VersionParseError;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?([0-9]+(?:\.[0-9]+)*)").expect("valid version regex"));

/// Numeric components of a version, major first.
///
/// Ordering treats missing trailing components as `0`, so `1.2` and `1.2.0`
/// are equal.
#[derive(Debug, Clone)]
pub struct VersionTuple(Vec<u64>);

impl VersionTuple {
    pub fn parse(version: &str) -> Result<Self, VersionParseError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let numeric = VERSION_PATTERN
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| VersionParseError::NoDigits(version.to_string()))?;

        numeric
            .as_str()
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| VersionParseError::Overflow(version.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for VersionTuple {
    fn from(components: Vec<u64>) -> Self {
        Self(components)
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Compare two versions component-wise, padding the shorter one with zeros
pub fn compare(a: &VersionTuple, b: &VersionTuple) -> Ordering {
    let len = a.0.len().max(b.0.len());
    (0..len)
        .map(|i| {
            let left = a.0.get(i).copied().unwrap_or(0);
            let right = b.0.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Whether `latest` is strictly newer than `current`
pub fn is_newer(latest: &VersionTuple, current: &VersionTuple) -> bool {
    compare(latest, current) == Ordering::Greater
}

impl PartialEq for VersionTuple {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for VersionTuple {}

impl PartialOrd for VersionTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}
