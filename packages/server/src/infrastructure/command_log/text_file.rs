//! Append-only text file command log.

use std::path::Path;

use async_trait::async_trait;
use ratecast_shared::time::format_log_timestamp;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use crate::domain::{CommandLogError, CommandSink, LogEntry};

pub const DEFAULT_COMMAND_LOG_PATH: &str = "exchange_log.txt";

/// Render one log line, including the trailing newline
pub fn format_log_line(entry: &LogEntry) -> String {
    format!(
        "Command executed: {} at {}\n",
        entry.command,
        format_log_timestamp(&entry.timestamp)
    )
}

/// [`CommandSink`] writing one line per command to a file opened in append mode.
///
/// The file handle sits behind a mutex so a line is always written whole.
pub struct FileCommandLogger {
    file: Mutex<File>,
}

impl FileCommandLogger {
    /// Open (or create) the log file at `path` for appending
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CommandLogError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        tracing::info!("Command log opened at {}", path.display());
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl CommandSink for FileCommandLogger {
    async fn append(&self, entry: LogEntry) -> Result<(), CommandLogError> {
        let line = format_log_line(&entry);
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        tracing::debug!("Logged command '{}'", entry.command);
        Ok(())
    }
}
