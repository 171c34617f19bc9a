//! UseCase layer: application logic on top of the domain seams.

mod dispatch_command;
mod error;
mod fetch_exchange_rates;

pub use dispatch_command::{DispatchCommandUseCase, chat_echo, render_exchange_summary};
pub use error::DispatchError;
pub use fetch_exchange_rates::FetchExchangeRatesUseCase;
