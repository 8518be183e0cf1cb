//! # Client State File
//!
//! A whole-document JSON store for the richer client-side state (items,
//! categories, history, settings) that the relational tables do not model.
//! Reads are forgiving, writes replace the document atomically.

use crate::StoreResult;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// JSON document persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    /// Serializes writers; the last one to take it wins wholesale.
    write_lock: Arc<Mutex<()>>,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored document.
    ///
    /// Returns an empty object when the file is missing, blank, unreadable
    /// or not valid JSON.
    pub fn read(&self) -> Value {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return empty(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "State file unreadable");
                return empty();
            }
        };

        if raw.trim().is_empty() {
            return empty();
        }

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "State file is not valid JSON");
            empty()
        })
    }

    /// Replace the stored document.
    ///
    /// Writes to a uniquely named sibling file and renames it over the
    /// target, so a concurrent reader sees either the old or the new document.
    pub fn write(&self, state: &Value) -> StoreResult<()> {
        let body = serde_json::to_vec_pretty(state)?;

        let _guard = self.write_lock.lock();
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "State file replaced");
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}
