//! Broadcast server with exchange-rate commands.
//!
//! Every line a client sends is broadcast to all connected clients, except
//! `exchange [days] [currency...]`, which is answered with recent exchange rates.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ratecast-server
//! cargo run --bin ratecast-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use ratecast_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    infrastructure::{
        command_log::{DEFAULT_COMMAND_LOG_PATH, FileCommandLogger},
        exchange::{DEFAULT_PROVIDER_URL, PrivatBankClient},
        registry::ConnectionRegistry,
    },
    ui::Server,
    usecase::{DispatchCommandUseCase, FetchExchangeRatesUseCase},
};
use ratecast_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "ratecast-server")]
#[command(about = "WebSocket broadcast server with exchange-rate commands", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Base URL of the exchange-rate provider
    #[arg(long, default_value = DEFAULT_PROVIDER_URL)]
    provider_url: String,

    /// File that executed commands are appended to
    #[arg(long, default_value = DEFAULT_COMMAND_LOG_PATH)]
    command_log: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            provider_url: args.provider_url,
            command_log_path: args.command_log,
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize dependencies in order:
    // 1. Clock / CommandSink / RateProvider
    // 2. UseCases
    // 3. Registry and Server
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let command_sink = Arc::new(FileCommandLogger::open(&config.command_log_path).await?);
    let provider = Arc::new(PrivatBankClient::new(
        config.provider_url.clone(),
        clock.clone(),
    ));

    let fetch_exchange_rates_usecase = Arc::new(FetchExchangeRatesUseCase::new(provider));
    let dispatch_command_usecase = Arc::new(DispatchCommandUseCase::new(
        fetch_exchange_rates_usecase,
        command_sink,
        clock,
    ));

    let registry = Arc::new(ConnectionRegistry::new());
    let server = Server::new(registry, dispatch_command_usecase);
    server.run(&config.host, config.port).await
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("Starting with {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
