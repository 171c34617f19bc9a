//! Domain layer: value objects, the command model and the seams to external collaborators.

mod command;
mod connection;
mod error;
mod provider;
mod quote;
mod sink;

pub use command::{
    Command, DEFAULT_CURRENCIES, DEFAULT_DAYS, EXCHANGE_KEYWORD, ExchangeQuery, MAX_DAYS,
    parse_command,
};
pub use connection::{ConnectionChannel, ConnectionId, OUTBOUND_QUEUE_CAPACITY};
pub use error::{CommandLogError, FetchError, RangeError};
pub use provider::RateProvider;
pub use quote::{CurrencyRate, ExchangeQuote};
pub use sink::{CommandSink, LogEntry};

#[cfg(test)]
pub use provider::MockRateProvider;
#[cfg(test)]
pub use sink::MockCommandSink;
