//! Authentication service.
//!
//! Registration and login against the user list kept under the users key.
//! A successful register or login establishes the session.

mod error;
mod password;

pub use error::{AuthError, ValidationError};
pub use password::{PasswordScheme, hash_password, sha256_hex, verify_password};

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use pashle_core::Email;

use crate::models::{Identity, User};
use crate::services::session::SessionState;
use crate::storage::{
    StorageError, StorageKeys, StoragePort, parse_json, read_json_list, write_json,
};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration form input.
#[derive(Debug)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email as typed; normalized before use.
    pub email: String,
    /// Chosen password.
    pub password: SecretString,
    /// Password confirmation.
    pub confirm_password: SecretString,
}

impl Registration {
    /// Build a registration form from plain strings.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Check the form rules in order: completeness, length, match.
    ///
    /// Completeness covers name, email and password. A blank confirmation
    /// is reported as a mismatch.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` that applies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let password = self.password.expose_secret();

        if self.name.trim().is_empty() || self.email.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::IncompleteFields);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if password != self.confirm_password.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Credential store.
///
/// Owns the registered user list. Every successful registration rewrites
/// the whole list; entries this version cannot read are carried over as-is.
pub struct CredentialStore<'a> {
    storage: &'a dyn StoragePort,
    users_key: &'a str,
    session: SessionState<'a>,
    scheme: PasswordScheme,
}

impl<'a> CredentialStore<'a> {
    /// Create a credential store.
    #[must_use]
    pub fn new(storage: &'a dyn StoragePort, keys: &'a StorageKeys, scheme: PasswordScheme) -> Self {
        Self {
            storage,
            users_key: &keys.users,
            session: SessionState::new(storage, &keys.session),
            scheme,
        }
    }

    /// All readable registered users. A missing or malformed list reads as
    /// empty; unreadable entries are skipped.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        read_json_list(self.storage, self.users_key)
    }

    /// Find a user by normalized email.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<User> {
        self.users().into_iter().find(|u| &u.email == email)
    }

    /// Register a new user and log them in.
    ///
    /// On any error the stored user list and session are left as they were.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a form rule fails.
    /// Returns `AuthError::DuplicateAccount` if the email is already registered.
    /// Returns `AuthError::Storage` or `AuthError::PasswordHash` on internal failure.
    #[instrument(skip(self, form), fields(email = %form.email.trim()))]
    pub async fn register(&self, form: &Registration) -> Result<Identity, AuthError> {
        form.validate().inspect_err(|e| warn!(reason = %e, "registration rejected"))?;

        let email = Email::parse(&form.email)?;
        let snapshot = self.storage.get(self.users_key)?;
        let mut records: Vec<Value> = snapshot
            .as_deref()
            .and_then(|raw| parse_json(self.users_key, raw))
            .unwrap_or_default();
        if records.iter().any(|r| record_email(r).as_ref() == Some(&email)) {
            warn!(email = %email, "email already registered");
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = hash_password(&form.password, self.scheme).await?;
        let user = User {
            name: form.name.trim().to_owned(),
            email,
            password_hash,
            created_at: Some(Utc::now()),
        };
        let identity = user.identity();

        records.push(serde_json::to_value(&user).map_err(StorageError::from)?);
        write_json(self.storage, self.users_key, &records)?;
        if let Err(e) = self.session.set(Some(&identity)) {
            self.restore_users(snapshot.as_deref());
            return Err(e.into());
        }

        info!(email = %identity.email, total_users = records.len(), "user registered");
        Ok(identity)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is empty.
    /// Returns `AuthError::AccountNotFound` if no user has that email.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    /// Returns `AuthError::Storage` if the session cannot be written.
    #[instrument(skip(self, password), fields(email = %email.trim()))]
    pub async fn verify(&self, email: &str, password: &SecretString) -> Result<Identity, AuthError> {
        if email.trim().is_empty() || password.expose_secret().is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let email = Email::parse(email)?;
        let Some(user) = self.find_by_email(&email) else {
            warn!(email = %email, "login unknown email");
            return Err(AuthError::AccountNotFound);
        };

        if !verify_password(password, &user.password_hash).await? {
            warn!(email = %email, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let identity = user.identity();
        self.session.set(Some(&identity))?;
        info!(email = %identity.email, "user logged in");
        Ok(identity)
    }

    /// Put the user list back to the text read before a failed registration.
    fn restore_users(&self, snapshot: Option<&str>) {
        let restored = match snapshot {
            Some(raw) => self.storage.set(self.users_key, raw),
            None => self.storage.remove(self.users_key),
        };
        if let Err(e) = restored {
            error!(key = self.users_key, error = %e, "failed to roll back user list");
        }
    }
}

/// Normalized email of a stored user entry, readable or not.
fn record_email(record: &Value) -> Option<Email> {
    record
        .get("email")
        .and_then(Value::as_str)
        .and_then(|raw| Email::parse(raw).ok())
}
