//! Append-only JSONL capture log.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for capture log operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to open capture log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to capture log: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize capture record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One captured write request, serialized as a single line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// Local wall-clock time of capture, RFC 3339.
    pub timestamp: String,
    /// Request target exactly as received (path and query).
    pub path: String,
    /// The parsed request document, stored as-is.
    pub body: Value,
}

impl CapturedRequest {
    /// Create a record stamped with the current time.
    pub fn now(path: impl Into<String>, body: Value) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            path: path.into(),
            body,
        }
    }
}

/// Write-only sink for [`CapturedRequest`] records.
///
/// The file is opened once in append mode and never truncated, read back or
/// compacted. The mutex serializes appends so a record is always written as
/// one whole line even if requests are ever served concurrently.
pub struct CaptureLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl CaptureLog {
    /// Open (creating if absent) the log file and any missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CaptureError::Open {
                path: path.clone(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| CaptureError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Append one record as a single newline-terminated JSON line.
    pub fn append(&self, record: &CapturedRequest) -> Result<(), CaptureError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // A poisoned lock only means another append panicked; the file handle is still usable.
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog").field("path", &self.path).finish()
    }
}
