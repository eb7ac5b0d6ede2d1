//! Snapshot format for the durable store.
//!
//! A snapshot is a JSON document carrying a format version, the time it was
//! written, and one record per account:
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-01T00:00:00Z",
//!   "accounts": [
//!     { "username": "alice", "password": "pw1", "balance": "70.00",
//!       "created_at": "2026-01-01T00:00:00Z" }
//!   ]
//! }
//! ```
//!
//! Balances are written as decimal strings so no precision is lost.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::error::PersistenceError;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Version header, decoded before the full document.
#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    accounts: Vec<AccountRecord>,
}

#[derive(Serialize, Deserialize)]
struct AccountRecord {
    username: String,
    password: String,
    #[serde(with = "rust_decimal::serde::str")]
    balance: Decimal,
    #[serde(default = "unix_epoch")]
    created_at: DateTime<Utc>,
}

const fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username().to_string(),
            password: account.password().to_string(),
            balance: account.balance(),
            created_at: account.created_at(),
        }
    }
}

/// Serialize accounts into a snapshot document.
///
/// Records are sorted by username so identical registries produce identical
/// bytes apart from `saved_at`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode<'a, I>(accounts: I) -> Result<Vec<u8>, PersistenceError>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut records: Vec<AccountRecord> =
        accounts.into_iter().map(AccountRecord::from).collect();
    records.sort_by(|a, b| a.username.cmp(&b.username));

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Some(Utc::now()),
        accounts: records,
    };
    Ok(serde_json::to_vec_pretty(&snapshot)?)
}

/// Deserialize a snapshot document into accounts.
///
/// # Errors
///
/// Returns an error if the document is not valid JSON, was written by an
/// unknown format version, holds a negative balance, or lists the same
/// username twice.
pub fn decode(bytes: &[u8]) -> Result<Vec<Account>, PersistenceError> {
    let header: Header = serde_json::from_slice(bytes)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(header.version));
    }

    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::with_capacity(snapshot.accounts.len());
    let mut accounts = Vec::with_capacity(snapshot.accounts.len());

    for record in snapshot.accounts {
        if record.balance < Decimal::ZERO {
            return Err(PersistenceError::Corrupt(format!(
                "negative balance for account {}",
                record.username
            )));
        }
        if !seen.insert(record.username.clone()) {
            return Err(PersistenceError::Corrupt(format!(
                "duplicate account {}",
                record.username
            )));
        }
        accounts.push(Account::from_parts(
            record.username,
            record.password,
            record.balance,
            record.created_at,
        ));
    }

    Ok(accounts)
}
