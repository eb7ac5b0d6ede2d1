//! # ledgerbank-core
//!
//! Core logic for the `LedgerBank` single-user banking ledger.
//!
//! This crate provides:
//! - Account model with deposit/withdraw validation
//! - Account store with versioned snapshot persistence
//! - Session state machine used by the interactive CLI

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod session;
pub mod store;

pub use account::{Account, MONEY_SCALE, parse_amount};
pub use error::{AmountRejection, Error, PersistenceError, Result};
pub use session::{Session, SessionState};
pub use store::AccountStore;
