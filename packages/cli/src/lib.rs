//! Batch mode: fetch the exchange rates of the last few days, print them, and
//! append them to a JSON array log.

use std::{path::PathBuf, sync::Arc};

use ratecast_server::{
    domain::{CommandLogError, ExchangeQuery, RangeError},
    infrastructure::{command_log::JsonArrayLog, exchange::PrivatBankClient},
    usecase::FetchExchangeRatesUseCase,
};
use ratecast_shared::time::Clock;
use serde_json::Value;
use thiserror::Error;

/// Batch mode errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The day count is outside 1..=10; nothing was fetched or written
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The JSON log could not be read or written
    #[error(transparent)]
    Log(#[from] CommandLogError),
}

/// Batch mode configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub provider_url: String,
    pub log_file: PathBuf,
}

/// `exchange <days>` runner
pub struct ExchangeRunner {
    fetch_exchange_rates_usecase: FetchExchangeRatesUseCase,
    log: JsonArrayLog,
}

impl ExchangeRunner {
    pub fn new(fetch_exchange_rates_usecase: FetchExchangeRatesUseCase, log: JsonArrayLog) -> Self {
        Self {
            fetch_exchange_rates_usecase,
            log,
        }
    }

    /// Wire the runner against the configured provider and log file
    pub fn from_config(config: &CliConfig, clock: Arc<dyn Clock>) -> Self {
        let provider = Arc::new(PrivatBankClient::new(config.provider_url.clone(), clock));
        Self::new(
            FetchExchangeRatesUseCase::new(provider),
            JsonArrayLog::new(config.log_file.clone()),
        )
    }

    /// Fetch every requested day and append the successful ones to the log.
    ///
    /// An out-of-range day count is rejected before any request is sent and the
    /// log file is not touched.
    ///
    /// # Returns
    ///
    /// The entries appended, one `{"<date>": {<rates>}}` object per day
    pub async fn run(&self, query: &ExchangeQuery) -> Result<Vec<Value>, CliError> {
        let quotes = self.fetch_exchange_rates_usecase.execute(query).await?;
        let entries: Vec<Value> = quotes.iter().map(|quote| quote.to_log_value()).collect();

        let total = self.log.extend(entries.clone()).await?;
        tracing::info!(
            "Appended {} entries to {} ({} total)",
            entries.len(),
            self.log.path().display(),
            total
        );
        Ok(entries)
    }
}

/// Render the aggregated result the way it is printed to stdout
pub fn render_entries(entries: &[Value]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}
