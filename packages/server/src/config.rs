//! Server configuration.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration of the broadcast server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to bind to
    pub port: u16,
    /// Base URL of the exchange-rate provider
    pub provider_url: String,
    /// Append-only command log file
    pub command_log_path: PathBuf,
}
