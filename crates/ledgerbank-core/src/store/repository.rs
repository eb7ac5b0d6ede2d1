//! Account registry backed by a snapshot file.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::codec;
use crate::account::Account;
use crate::error::{Error, PersistenceError, Result};

/// Registry of all accounts, keyed by username.
///
/// The whole registry is rewritten to disk on every [`persist`](Self::persist);
/// there is no incremental or append-only log.
#[derive(Debug)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
    path: Option<PathBuf>,
}

impl AccountStore {
    /// Open the store at `path`, restoring any previously saved accounts.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and also yields an empty store.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            accounts: HashMap::new(),
            path: Some(path.into()),
        };
        if store.restore().is_err() {
            warn!("Continuing with an empty account store");
        }
        store
    }

    /// Create a store with no backing file, for testing.
    ///
    /// [`persist`](Self::persist) is a no-op on such a store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            accounts: HashMap::new(),
            path: None,
        }
    }

    /// Location of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Registered usernames, sorted.
    #[must_use]
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accounts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up an account without authenticating.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub(crate) fn get_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.get_mut(username)
    }

    /// Register a new account and persist the registry.
    ///
    /// A failure to persist is logged but does not undo the insert and does
    /// not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if `username` is taken. The existing
    /// account is left untouched.
    pub fn create(&mut self, username: &str, password: &str) -> Result<()> {
        if self.accounts.contains_key(username) {
            warn!(username, "Account already exists");
            return Err(Error::AlreadyExists(username.to_string()));
        }

        self.accounts
            .insert(username.to_string(), Account::new(username, password));
        info!(username, "Account created");

        if let Err(e) = self.persist() {
            error!(username, "Failed to save accounts after create: {e}");
        }
        Ok(())
    }

    /// Authenticate and return a handle to the stored account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if the username is unknown or the
    /// password does not match. The two cases are not distinguished.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&mut Account> {
        match self.accounts.get_mut(username) {
            Some(account) if account.authenticate(password) => {
                info!(username, "Login successful");
                Ok(account)
            }
            _ => {
                warn!(username, "Login failed");
                Err(Error::InvalidCredentials)
            }
        }
    }

    /// Write the full registry to the backing file.
    ///
    /// The snapshot goes to a temporary file in the same directory which is
    /// then renamed over the target, so readers never see a half-written
    /// store. The temporary file is removed if any step fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if encoding or any file operation fails.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let bytes = codec::encode(self.accounts.values())?;

        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(
            "Saved {} accounts to {}",
            self.accounts.len(),
            path.display()
        );
        Ok(())
    }

    /// Reload the registry from the backing file.
    ///
    /// A missing file restores an empty registry. On failure the registry is
    /// emptied and the error logged before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the file cannot be read or decoded.
    pub fn restore(&mut self) -> Result<()> {
        match self.load() {
            Ok(accounts) => {
                self.accounts = accounts;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load accounts, starting empty: {e}");
                self.accounts.clear();
                Err(e.into())
            }
        }
    }

    fn load(&self) -> std::result::Result<HashMap<String, Account>, PersistenceError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(HashMap::new());
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No account store at {}, starting empty", path.display());
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        let accounts: HashMap<String, Account> = codec::decode(&bytes)?
            .into_iter()
            .map(|account| (account.username().to_string(), account))
            .collect();

        debug!("Loaded {} accounts from {}", accounts.len(), path.display());
        Ok(accounts)
    }
}
