//! In-memory command log.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CommandLogError, CommandSink, LogEntry};

/// [`CommandSink`] keeping entries in memory, in arrival order.
#[derive(Default)]
pub struct MemoryCommandLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryCommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries appended so far
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl CommandSink for MemoryCommandLog {
    async fn append(&self, entry: LogEntry) -> Result<(), CommandLogError> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}
