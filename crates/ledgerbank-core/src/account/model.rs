//! Account model types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{AmountRejection, Error, Result};

/// A single user's credentials and balance.
///
/// The balance is never negative: it only changes through [`Account::deposit`]
/// and [`Account::withdraw`], both of which reject amounts that would break
/// that rule and leave the balance untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    username: String,
    password: String,
    balance: Decimal,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance.
    ///
    /// Username and password are taken as-is; empty strings are accepted.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Rebuild an account from persisted fields.
    pub(crate) const fn from_parts(
        username: String,
        password: String,
        balance: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password,
            balance,
            created_at,
        }
    }

    /// Account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password, exposed for the snapshot codec only.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// When the account was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check a candidate password.
    ///
    /// Exact, case-sensitive comparison against the stored plaintext.
    #[must_use]
    pub fn authenticate(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Add `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] if `amount` is not positive or the new
    /// balance would overflow. The balance is unchanged on error.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            warn!(username = %self.username, %amount, "Rejected deposit");
            return Err(Error::InvalidAmount(AmountRejection::NotPositive));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount(AmountRejection::Overflow))?;
        info!(username = %self.username, %amount, "Deposited");
        Ok(())
    }

    /// Remove `amount` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] if `amount` is not positive or exceeds
    /// the balance. The balance is unchanged on error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        let rejection = if amount <= Decimal::ZERO {
            Some(AmountRejection::NotPositive)
        } else if amount > self.balance {
            Some(AmountRejection::InsufficientFunds)
        } else {
            None
        };

        if let Some(reason) = rejection {
            warn!(username = %self.username, %amount, %reason, "Rejected withdrawal");
            return Err(Error::InvalidAmount(reason));
        }

        self.balance -= amount;
        info!(username = %self.username, %amount, "Withdrawn");
        Ok(())
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("balance", &self.balance)
            .field("created_at", &self.created_at)
            .finish()
    }
}
