//! Infrastructure layer: concrete implementations of the domain seams.

pub mod command_log;
pub mod exchange;
pub mod registry;
