//! Interactive session over an account store.
//!
//! A [`Session`] tracks which account, if any, is logged in and routes
//! balance operations to it:
//!
//! - `LoggedOut`: initial state, only account creation and login allowed
//! - `LoggedIn`: one account is active, deposit/withdraw/balance allowed
//!
//! Every successful deposit or withdrawal is followed by a full save of the
//! store. A failed save is logged and the in-memory change is kept.

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::account::Account;
use crate::error::{Error, Result};
use crate::store::AccountStore;

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No account is active.
    #[default]
    LoggedOut,
    /// The named account is active.
    LoggedIn(String),
}

impl SessionState {
    /// Returns `true` if an account is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    /// Returns the active username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn(username) => Some(username),
            Self::LoggedOut => None,
        }
    }
}

/// A user session bound to an account store.
#[derive(Debug)]
pub struct Session<'a> {
    store: &'a mut AccountStore,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Start a logged-out session.
    pub fn new(store: &'a mut AccountStore) -> Self {
        Self {
            store,
            state: SessionState::LoggedOut,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns `true` if an account is active.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    /// Username of the active account, if any.
    #[must_use]
    pub fn active_username(&self) -> Option<&str> {
        self.state.username()
    }

    /// Register a new account. Allowed whether or not a session is active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the username is taken.
    pub fn create_account(&mut self, username: &str, password: &str) -> Result<()> {
        self.store.create(username, password)
    }

    /// Log in to an account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyLoggedIn`] if a session is already active, or
    /// [`Error::InvalidCredentials`] if authentication fails.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if let SessionState::LoggedIn(active) = &self.state {
            return Err(Error::AlreadyLoggedIn(active.clone()));
        }

        let account = self.store.login(username, password)?;
        self.state = SessionState::LoggedIn(account.username().to_string());
        Ok(())
    }

    /// End the active session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if no session is active.
    pub fn logout(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            SessionState::LoggedIn(username) => {
                info!(username, "Logged out");
                Ok(())
            }
            SessionState::LoggedOut => Err(Error::NotLoggedIn),
        }
    }

    /// Balance of the active account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if no session is active.
    pub fn balance(&self) -> Result<Decimal> {
        let username = self.state.username().ok_or(Error::NotLoggedIn)?;
        self.store
            .get(username)
            .map(Account::balance)
            .ok_or(Error::NotLoggedIn)
    }

    /// Deposit into the active account and save. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if no session is active, or
    /// [`Error::InvalidAmount`] if the deposit is rejected.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        self.mutate(|account| account.deposit(amount))
    }

    /// Withdraw from the active account and save. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] if no session is active, or
    /// [`Error::InvalidAmount`] if the withdrawal is rejected.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        self.mutate(|account| account.withdraw(amount))
    }

    fn mutate<F>(&mut self, op: F) -> Result<Decimal>
    where
        F: FnOnce(&mut Account) -> Result<()>,
    {
        let username = self.state.username().ok_or(Error::NotLoggedIn)?;
        let account = self.store.get_mut(username).ok_or(Error::NotLoggedIn)?;
        op(account)?;
        let balance = account.balance();

        if let Err(e) = self.store.persist() {
            error!(username, "Failed to save accounts: {e}");
        }
        Ok(balance)
    }
}
