//! Currency exchange utility.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ratecast -- exchange 3
//! cargo run --bin ratecast -- --log-file rates.json exchange 2 --currency PLN
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use ratecast_cli::{CliConfig, CliError, ExchangeRunner, render_entries};
use ratecast_server::{
    domain::{DEFAULT_CURRENCIES, ExchangeQuery},
    infrastructure::{command_log::DEFAULT_JSON_LOG_PATH, exchange::DEFAULT_PROVIDER_URL},
};
use ratecast_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "ratecast")]
#[command(about = "Currency exchange utility", long_about = None)]
struct Args {
    /// Base URL of the exchange-rate provider
    #[arg(long, global = true, default_value = DEFAULT_PROVIDER_URL)]
    provider_url: String,

    /// JSON file the results are appended to
    #[arg(long, global = true, default_value = DEFAULT_JSON_LOG_PATH)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Get exchange rates for the last <DAYS> days (1 to 10 days)
    Exchange {
        /// Number of days to get exchange rates for
        #[arg(allow_negative_numbers = true)]
        days: i64,

        /// Currency code to include (repeatable, defaults to EUR and USD)
        #[arg(short = 'c', long = "currency")]
        currencies: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let config = CliConfig {
        provider_url: args.provider_url,
        log_file: args.log_file,
    };

    match args.command {
        CliCommand::Exchange { days, currencies } => {
            let currencies = if currencies.is_empty() {
                DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
            } else {
                currencies.iter().map(|c| c.to_uppercase()).collect()
            };
            let query = ExchangeQuery::new(days, currencies);

            let runner = ExchangeRunner::from_config(&config, Arc::new(SystemClock));
            match runner.run(&query).await {
                Ok(entries) => println!("{}", render_entries(&entries)),
                // A rejected day count is a usage error, not a failure.
                Err(CliError::Range(e)) => println!("{}", e),
                Err(e) => {
                    tracing::error!("{}", e);
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
