//! Exchange-rate provider trait.
//!
//! The use case layer depends on this trait only; the HTTP implementation lives
//! in the infrastructure layer.

use async_trait::async_trait;

use super::{error::FetchError, quote::ExchangeQuote};

/// Source of daily exchange rates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the rates of `currencies` for the day `day_offset` days before today.
    ///
    /// Currencies the provider does not report are omitted from the quote.
    async fn fetch_rates(
        &self,
        day_offset: u32,
        currencies: &[String],
    ) -> Result<ExchangeQuote, FetchError>;
}
