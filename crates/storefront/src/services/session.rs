//! Session state: at most one active identity per profile.

use tracing::{debug, info};

use crate::models::Identity;
use crate::storage::{StorageError, StoragePort, read_json, write_json};

/// Reads and writes the active session.
///
/// A missing or malformed session document reads as "nobody logged in".
pub struct SessionState<'a> {
    storage: &'a dyn StoragePort,
    key: &'a str,
}

impl<'a> SessionState<'a> {
    /// Create a session accessor over `key`.
    #[must_use]
    pub const fn new(storage: &'a dyn StoragePort, key: &'a str) -> Self {
        Self { storage, key }
    }

    /// The active identity, if any.
    #[must_use]
    pub fn get(&self) -> Option<Identity> {
        read_json(self.storage, self.key)
    }

    /// Replace the active session, or remove it when `identity` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub fn set(&self, identity: Option<&Identity>) -> Result<(), StorageError> {
        match identity {
            Some(identity) => {
                write_json(self.storage, self.key, identity)?;
                debug!(email = %identity.email, "session established");
            }
            None => {
                self.storage.remove(self.key)?;
                debug!("session cleared");
            }
        }
        Ok(())
    }

    /// Log out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        if let Some(identity) = self.get() {
            info!(email = %identity.email, "user logged out");
        }
        self.set(None)
    }

    /// Navbar greeting for the active identity, e.g. `"Hi, Asha"`.
    #[must_use]
    pub fn greeting(&self) -> Option<String> {
        let identity = self.get()?;
        identity.first_name().map(|first| format!("Hi, {first}"))
    }
}
