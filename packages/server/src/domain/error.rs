//! Domain errors.

use thiserror::Error;

use super::command::MAX_DAYS;

/// Failure to fetch one day's exchange rates.
///
/// Every variant is recoverable: the affected day is skipped and the batch goes on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Network or connection failure (timeout, reset, DNS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("provider returned status {status} for {date}")]
    RemoteStatus { status: u16, date: String },

    /// The provider answered 200 but the body could not be decoded
    #[error("malformed provider response: {0}")]
    Decode(String),
}

/// The requested number of days is outside `1..=MAX_DAYS`.
///
/// Zero and negative counts are rejected like counts above the cap.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Error: The number of days must be between 1 and {max} (requested {days}).", max = MAX_DAYS)]
pub struct RangeError {
    pub days: i64,
}

/// Failure to append to a command log.
#[derive(Debug, Error)]
pub enum CommandLogError {
    #[error("failed to write command log: {0}")]
    Io(#[from] std::io::Error),

    #[error("command log is not a valid JSON array: {0}")]
    Json(#[from] serde_json::Error),
}
