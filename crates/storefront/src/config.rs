//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PASHLE_DATA_DIR` - Profile directory holding the stored documents (default: .pashle)
//! - `PASHLE_STORAGE_PREFIX` - Storage key prefix (default: pashle)
//! - `PASHLE_PASSWORD_SCHEME` - `sha256` or `argon2` (default: sha256)
//! - `PASHLE_CURRENCY` - Display currency, ISO 4217 (default: INR)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use pashle_core::CurrencyCode;

use crate::services::PasswordScheme;
use crate::storage::{DEFAULT_PREFIX, StorageKeys};

const DEFAULT_DATA_DIR: &str = ".pashle";
const DEFAULT_SENTRY_ENVIRONMENT: &str = "development";
const MAX_PREFIX_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
///
/// Implements `Debug` manually to redact the Sentry DSN.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Directory for the file storage backend
    pub data_dir: PathBuf,
    /// Prefix for the storage keys
    pub storage_prefix: String,
    /// Scheme used for newly registered passwords
    pub password_scheme: PasswordScheme,
    /// Currency used to format prices
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name
    pub sentry_environment: String,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("data_dir", &self.data_dir)
            .field("storage_prefix", &self.storage_prefix)
            .field("password_scheme", &self.password_scheme)
            .field("currency", &self.currency)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_prefix: DEFAULT_PREFIX.to_owned(),
            password_scheme: PasswordScheme::default(),
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: DEFAULT_SENTRY_ENVIRONMENT.to_owned(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get("PASHLE_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let storage_prefix = get("PASHLE_STORAGE_PREFIX")
            .unwrap_or_else(|| DEFAULT_PREFIX.to_owned());
        validate_prefix(&storage_prefix, "PASHLE_STORAGE_PREFIX")?;

        let password_scheme = parse_or_default("PASHLE_PASSWORD_SCHEME", get("PASHLE_PASSWORD_SCHEME"))?;
        let currency = parse_or_default("PASHLE_CURRENCY", get("PASHLE_CURRENCY"))?;

        let sentry_dsn = get("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get("SENTRY_ENVIRONMENT")
            .unwrap_or_else(|| DEFAULT_SENTRY_ENVIRONMENT.to_owned());

        Ok(Self {
            data_dir,
            storage_prefix,
            password_scheme,
            currency,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Storage keys derived from the configured prefix.
    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.storage_prefix)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to the type's default.
fn parse_or_default<T>(key: &str, value: Option<String>) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    value.map_or_else(
        || Ok(T::default()),
        |v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        },
    )
}

/// Prefixes end up in storage keys and file names.
fn validate_prefix(prefix: &str, var_name: &str) -> Result<(), ConfigError> {
    if prefix.len() > MAX_PREFIX_LENGTH || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be 1-{MAX_PREFIX_LENGTH} ASCII letters or digits"),
        ));
    }
    Ok(())
}
