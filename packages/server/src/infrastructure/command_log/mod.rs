//! Command log implementations.
//!
//! - `text_file`: append-only text file used by the chat server
//! - `memory`: in-process sink for tests and embedding
//! - `json_array`: read-merge-write JSON array used by the batch CLI

pub mod json_array;
pub mod memory;
pub mod text_file;

pub use json_array::{DEFAULT_JSON_LOG_PATH, JsonArrayLog};
pub use memory::MemoryCommandLog;
pub use text_file::{DEFAULT_COMMAND_LOG_PATH, FileCommandLogger, format_log_line};
