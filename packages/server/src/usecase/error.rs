//! UseCase layer errors.

use thiserror::Error;

use crate::domain::RangeError;

/// A command that must be reported back to its sender instead of broadcast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Range(#[from] RangeError),
}
