//! Command-line arguments and configuration.

use std::path::PathBuf;

use clap::Parser;

/// Log filter used when neither `--log-level` nor `RUST_LOG` is given.
///
/// Kept at `warn` so log lines do not interleave with the menu.
pub const DEFAULT_LOG_FILTER: &str = "ledgerbank=warn,ledgerbank_core=warn";

#[derive(Parser, Debug)]
#[command(name = "ledgerbank")]
#[command(about = "Single-user banking ledger with persistent accounts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Account store file
    #[arg(long, value_name = "PATH", env = "LEDGERBANK_STORE")]
    pub store: Option<PathBuf>,

    /// Log filter directive, e.g. "ledgerbank_core=debug" (RUST_LOG takes precedence)
    #[arg(long, value_name = "FILTER", env = "LEDGERBANK_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

impl Cli {
    /// Store path from the command line, or the per-user default.
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(default_store_path)
    }
}

/// `<data dir>/ledgerbank/accounts.json`, or `./ledgerbank/accounts.json`
/// when the platform has no data directory.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ledgerbank")
        .join("accounts.json")
}
