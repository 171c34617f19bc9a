//! Exchange-rate provider implementations.
//!
//! - `privatbank`: HTTP client for the PrivatBank archive API

mod dto;
pub mod privatbank;

pub use privatbank::{DEFAULT_PROVIDER_URL, PrivatBankClient};
