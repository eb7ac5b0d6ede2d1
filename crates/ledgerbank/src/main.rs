//! `LedgerBank` - single-user banking ledger
//!
//! Interactive menu over a persistent account store.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod menu;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use ledgerbank_core::{AccountStore, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the menu on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store_path = cli.store_path();
    info!("Starting LedgerBank with store {}", store_path.display());

    let mut store = AccountStore::open(&store_path);
    info!("Loaded {} accounts", store.len());

    let mut session = Session::new(&mut store);
    menu::run(&mut session, io::stdin().lock(), io::stdout().lock())
        .context("terminal I/O failed")?;

    info!("Exiting LedgerBank");
    Ok(())
}
