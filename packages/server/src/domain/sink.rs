//! Command log sink trait.

use async_trait::async_trait;
use chrono::{DateTime, Local};

use super::error::CommandLogError;

/// One executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Raw command text as the client sent it
    pub command: String,
    /// Completion time of the command
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(command: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            command: command.into(),
            timestamp,
        }
    }
}

/// Append-only record of executed commands.
///
/// Implementations must make each append atomic with respect to the others and
/// keep entries in arrival order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn append(&self, entry: LogEntry) -> Result<(), CommandLogError>;
}
