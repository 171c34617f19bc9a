//! Real-time broadcast hub library.
//!
//! Clients connect over WebSocket, send plain text lines, and receive fan-out
//! notifications: membership changes, chat echoes, and exchange-rate summaries.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
