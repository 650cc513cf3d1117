//! Command-line host for the Tally token contract
//!
//! Runs one contract call per process against a file-backed world state.
//! Payloads go to stdout. Events go to stdout as JSON lines or to the log,
//! per `--events`. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tally_cli::{write_response, CliConfig, CliHandler, EventOutput};
use tally_effects::FileStateStore;
use tally_token::TokenContract;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally - ERC20-style token ledger over a key-value world state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "tally.toml")]
    config: PathBuf,

    /// World-state file (overrides config and TALLY_STATE_PATH)
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    /// Event destination (overrides config)
    #[arg(long, global = true, value_enum)]
    events: Option<EventOutput>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a token and credit its supply to the owner
    Init {
        /// Token name
        name: String,
        /// Ticker symbol
        symbol: String,
        /// Address receiving the initial supply
        owner: String,
        /// Initial supply
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Invoke a contract operation
    Invoke {
        /// Operation name, e.g. `transfer`
        operation: String,
        /// Positional arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn init_logging(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)?;
    config.apply_env();
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if let Some(events) = cli.events {
        config.events = events;
    }
    init_logging(cli.verbose, &config.log_level);

    let contract = TokenContract::new(config.contract.clone())?;
    let store = FileStateStore::open(&config.state_path).with_context(|| {
        format!("Failed to open world state {}", config.state_path.display())
    })?;
    let handler = CliHandler::new(contract, store, config.events.sink());

    let response = match &cli.command {
        Commands::Init {
            name,
            symbol,
            owner,
            amount,
        } => handler.handle_init(name, symbol, owner, amount),
        Commands::Invoke { operation, args } => handler.handle_invoke(operation, args),
    };

    write_response(
        &response,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
