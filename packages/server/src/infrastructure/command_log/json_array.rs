//! JSON array log used by the batch CLI.
//!
//! Every write loads the existing array, extends it, and rewrites the whole file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::CommandLogError;

pub const DEFAULT_JSON_LOG_PATH: &str = "exchange_log.json";

pub struct JsonArrayLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonArrayLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current array; a missing or blank file is an empty array
    pub async fn load(&self) -> Result<Vec<Value>, CommandLogError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Append `entries` to the array on disk and return the new total length
    pub async fn extend(&self, entries: Vec<Value>) -> Result<usize, CommandLogError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load().await?;
        log.extend(entries);

        let serialized = serde_json::to_string_pretty(&log)?;
        tokio::fs::write(&self.path, serialized).await?;
        tracing::debug!(
            "Wrote {} entries to {}",
            log.len(),
            self.path.display()
        );
        Ok(log.len())
    }
}
