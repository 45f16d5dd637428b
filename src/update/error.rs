use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("Empty version string")]
    Empty,

    #[error("No numeric version found in {0:?}")]
    NoDigits(String),

    #[error("Version component out of range in {0:?}")]
    Overflow(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status}{body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(#[from] VersionParseError),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout(e.to_string())
        } else if e.is_decode() {
            LookupError::MalformedBody(e.to_string())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}

impl LookupError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupError::Timeout(_) => FailureKind::Timeout,
            LookupError::Transport(_) => FailureKind::Transport,
            LookupError::HttpStatus { .. } => FailureKind::HttpStatus,
            LookupError::MalformedBody(_) => FailureKind::MalformedBody,
            LookupError::InvalidVersion(_) => FailureKind::InvalidVersion,
        }
    }
}

/// Classification of a failed check, recorded in logs and outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Timeout,
    Transport,
    HttpStatus,
    MalformedBody,
    InvalidVersion,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
            FailureKind::HttpStatus => "http_status",
            FailureKind::MalformedBody => "malformed_body",
            FailureKind::InvalidVersion => "invalid_version",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats the start of a response body for inclusion in an error message
pub(crate) fn body_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.trim().chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
