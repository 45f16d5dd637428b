//! JSON file storage for the check result record
//!
//! The engine itself never touches storage; this is what the bundled command
//! line host uses to keep the record between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::update::UpdateCheckResult;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored record.
    ///
    /// A missing file yields defaults. A corrupt file is logged and also
    /// yields defaults, which makes the next check due.
    pub fn load(&self) -> Result<UpdateCheckResult, StateError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {:?}, starting fresh", self.path);
                return Ok(UpdateCheckResult::default());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Ignoring unreadable state file {:?}: {}", self.path, e);
            UpdateCheckResult::default()
        }))
    }

    pub fn save(&self, result: &UpdateCheckResult) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(result)?;
        fs::write(&self.path, json).map_err(io_err)?;
        debug!("Saved state to {:?}", self.path);
        Ok(())
    }
}
