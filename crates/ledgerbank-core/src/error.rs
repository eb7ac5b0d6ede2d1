//! Error types for the core library.

use thiserror::Error;

/// Why an amount was rejected.
///
/// All reasons surface as [`Error::InvalidAmount`]; the reason only shapes
/// the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRejection {
    /// Amount is zero or negative.
    NotPositive,
    /// Withdrawal exceeds the current balance.
    InsufficientFunds,
    /// Input is not a decimal number.
    Malformed,
    /// Input has more than two fractional digits.
    TooPrecise,
    /// Result would not fit in the balance type.
    Overflow,
}

impl AmountRejection {
    /// Get human-readable reason.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotPositive => "amount must be greater than zero",
            Self::InsufficientFunds => "insufficient balance",
            Self::Malformed => "not a decimal number",
            Self::TooPrecise => "at most two decimal places are allowed",
            Self::Overflow => "amount is too large",
        }
    }
}

impl std::fmt::Display for AmountRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Failure reading or writing the durable store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Snapshot was written by an unknown format version.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// Snapshot decoded but violates a store invariant.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An account with this username is already registered.
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// Unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Deposit or withdrawal amount was rejected.
    #[error("Invalid amount: {0}")]
    InvalidAmount(AmountRejection),

    /// Reading or writing the durable store failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Operation requires an active session.
    #[error("No account is logged in")]
    NotLoggedIn,

    /// A session is already active.
    #[error("Already logged in as {0}")]
    AlreadyLoggedIn(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Persistence(PersistenceError::Io(e))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
