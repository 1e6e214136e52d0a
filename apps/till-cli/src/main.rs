//! # Till POS Operator Shell
//!
//! Thin presentation layer over `till-client`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shell Startup                                   │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize tracing                                                  │
//! │     • tracing-subscriber with env filter, logs on stderr                │
//! │     • Default: info,till=debug,reqwest=warn; override with RUST_LOG     │
//! │  3. Load ClientConfig (file → env → validate)                          │
//! │  4. Build PosSession with the console emitter                          │
//! │  5. Run the subcommand                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod admin;
mod console;
mod register;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use till_client::{ClientConfig, NoOpEmitter, PosSession};
use till_core::CategoryId;

use admin::{BillCommand, ItemCommand};
use console::ConsoleEmitter;

#[derive(Debug, Parser)]
#[command(name = "till", version, about = "Till POS operator shell")]
struct Cli {
    /// Path to till.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List categories
    Categories,
    /// List items, optionally for one category
    Items {
        #[arg(long)]
        category: Option<CategoryId>,
    },
    /// Create, update or delete catalog items
    #[command(subcommand)]
    Item(ItemCommand),
    /// Revenue, per-category and per-item sales, recent bills
    Dashboard,
    /// Show, edit or delete stored bills
    #[command(subcommand)]
    Bill(BillCommand),
    /// Interactive register session
    Register,
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = ClientConfig::load(cli.config.clone()).context("loading configuration")?;
    info!(terminal = config.terminal_name(), "Starting Till POS shell");

    match cli.command {
        Command::Config { write } => {
            print!("{}", config.to_toml()?);
            if write {
                let path = config.save(cli.config).context("writing configuration")?;
                eprintln!("Wrote {}", path.display());
            }
        }
        Command::Categories => {
            let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
            session.start().await?;
            print!("{}", console::render_categories(&session.categories().await));
        }
        Command::Items { category } => {
            let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
            session.select_category(category).await?;
            print!("{}", console::render_items(&session.items().await));
        }
        Command::Dashboard => {
            let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
            let dashboard = session.analytics().load_dashboard().await;
            print!("{}", console::render_dashboard(&dashboard));
        }
        Command::Item(command) => {
            let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
            admin::run_item(&session, command).await?;
        }
        Command::Bill(command) => {
            let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
            admin::run_bill(&session, command).await?;
        }
        Command::Register => {
            let session = PosSession::connect(&config, Arc::new(ConsoleEmitter))?;
            register::run(&session).await?;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_client=trace` - Trace the client crate only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
