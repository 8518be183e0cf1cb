//! Persisted identifier of the current live summary message.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// The id of the most recently posted live summary, mirrored to a file so
/// the previous message can still be deleted after a restart.
#[derive(Debug)]
pub struct LiveMessageHandle {
    path: PathBuf,
    current: Option<String>,
}

impl LiveMessageHandle {
    /// Load the handle from `path`. A missing or blank file means no message.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(raw) => Some(raw.trim().to_string()).filter(|id| !id.is_empty()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Live message handle unreadable");
                None
            }
        };
        Self { path, current }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Record a newly posted message id, in memory first and then on disk.
    pub fn store(&mut self, id: &str) -> std::io::Result<()> {
        self.current = Some(id.to_string());
        fs::write(&self.path, id)
    }
}
