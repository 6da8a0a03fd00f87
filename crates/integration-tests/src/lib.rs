//! Integration tests for the Pashle storefront.
//!
//! The tests drive complete flows through [`AppState`] over file storage in
//! a fresh temporary directory per test.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pashle-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Register, log in, log out across process restarts
//! - `cart_flow` - Cart persistence and recovery from damaged documents

use std::path::PathBuf;

use pashle_storefront::config::StorefrontConfig;
use pashle_storefront::services::PasswordScheme;
use pashle_storefront::state::AppState;
use pashle_storefront::storage::StorageError;

/// A profile directory removed on drop.
pub struct TestProfile {
    dir: PathBuf,
}

impl TestProfile {
    /// Create a unique empty profile under the system temp directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("pashle-it-{}", uuid::Uuid::new_v4()));
        Self { dir }
    }

    /// Path of the document stored under `key`.
    #[must_use]
    pub fn document(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Open application state over this profile, as a fresh process would.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile directory cannot be created.
    pub fn open(&self, scheme: PasswordScheme) -> Result<AppState, StorageError> {
        let config = StorefrontConfig {
            data_dir: self.dir.clone(),
            password_scheme: scheme,
            ..StorefrontConfig::default()
        };
        AppState::new(config)
    }
}

impl Default for TestProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestProfile {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
