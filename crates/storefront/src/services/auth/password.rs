//! Password digests.
//!
//! Two schemes are supported:
//!
//! - `sha256` (default): unsalted SHA-256 of the UTF-8 password, lowercase
//!   hex. Deterministic, so the same password always yields the same stored
//!   string. This matches accounts created by the browser storefront.
//! - `argon2`: salted Argon2id PHC string.
//!
//! Verification looks at the stored value, not the configured scheme, so a
//! profile can hold both kinds of record.

use std::fmt;
use std::str::FromStr;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::error;

use super::AuthError;

/// PHC prefix of Argon2 hashes.
const ARGON2_PREFIX: &str = "$argon2";

/// How new password digests are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Unsalted SHA-256, lowercase hex.
    #[default]
    Sha256,
    /// Salted Argon2id PHC string.
    Argon2,
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            _ => Err(format!("unknown password scheme: {s}")),
        }
    }
}

/// Lowercase hex SHA-256 of `plain`.
#[must_use]
pub fn sha256_hex(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash a password with the given scheme on a blocking worker.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails or the worker panics.
pub async fn hash_password(plain: &SecretString, scheme: PasswordScheme) -> Result<String, AuthError> {
    let plain = plain.expose_secret().to_owned();
    tokio::task::spawn_blocking(move || match scheme {
        PasswordScheme::Sha256 => Ok(sha256_hex(&plain)),
        PasswordScheme::Argon2 => hash_argon2(&plain),
    })
    .await
    .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

/// Check a password against a stored digest on a blocking worker.
///
/// SHA-256 digests are compared by exact string equality.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the stored Argon2 hash is malformed
/// or the worker panics.
pub async fn verify_password(plain: &SecretString, stored: &str) -> Result<bool, AuthError> {
    let plain = plain.expose_secret().to_owned();
    let stored = stored.to_owned();
    tokio::task::spawn_blocking(move || {
        if stored.starts_with(ARGON2_PREFIX) {
            verify_argon2(&plain, &stored)
        } else {
            Ok(sha256_hex(&plain) == stored)
        }
    })
    .await
    .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

fn hash_argon2(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AuthError::PasswordHash(e.to_string())
        })
}

fn verify_argon2(plain: &str, stored: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AuthError::PasswordHash(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
