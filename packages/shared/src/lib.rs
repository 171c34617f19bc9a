//! Shared utilities for the Ratecast server and CLI.

pub mod logger;
pub mod time;
