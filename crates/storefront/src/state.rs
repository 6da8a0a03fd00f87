//! Application state shared across commands.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{CartStore, CredentialStore, SessionState};
use crate::storage::{FileStorage, StorageError, StorageKeys, StoragePort};

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configured storage backend and the stores built on it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Arc<dyn StoragePort>,
    keys: StorageKeys,
}

impl AppState {
    /// Create application state backed by file storage at `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    /// Create application state over an existing backend.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn StoragePort>) -> Self {
        let keys = config.storage_keys();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                keys,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn StoragePort {
        self.inner.storage.as_ref()
    }

    /// Get the storage keys in use.
    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.inner.keys
    }

    /// Credential store over the shared backend.
    #[must_use]
    pub fn credentials(&self) -> CredentialStore<'_> {
        CredentialStore::new(self.storage(), self.keys(), self.config().password_scheme)
    }

    /// Session accessor over the shared backend.
    #[must_use]
    pub fn session(&self) -> SessionState<'_> {
        SessionState::new(self.storage(), &self.keys().session)
    }

    /// Load the cart from the shared backend.
    #[must_use]
    pub fn cart(&self) -> CartStore<'_> {
        CartStore::load(self.storage(), &self.keys().cart, self.config().currency)
    }
}
