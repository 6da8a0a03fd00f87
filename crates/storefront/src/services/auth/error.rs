//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// A form-level rule that the input failed.
///
/// The `Display` text is the message shown in the form's message area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A registration field is empty.
    #[error("Please complete all fields.")]
    IncompleteFields,

    /// The password is shorter than the minimum.
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// A login field is empty.
    #[error("Provide email and password.")]
    MissingCredentials,
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Form input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Email could not be normalized.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] pashle_core::EmailError),

    /// An account with the same normalized email exists.
    #[error("user already exists")]
    DuplicateAccount,

    /// No account matches the email.
    #[error("user not found")]
    AccountNotFound,

    /// The password does not match the stored digest.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Persisting the user list or session failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

impl AuthError {
    /// Short message suitable for a form's message area.
    ///
    /// Internal failures are not described beyond "error".
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email.".to_owned(),
            Self::DuplicateAccount => "An account with this email already exists.".to_owned(),
            Self::AccountNotFound => "No account found with that email.".to_owned(),
            Self::InvalidCredentials => "Incorrect password.".to_owned(),
            Self::Storage(_) | Self::PasswordHash(_) => {
                "Something went wrong (error). Please try again.".to_owned()
            }
        }
    }

    /// Whether the user can fix the problem by editing the form and retrying.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::PasswordHash(_))
    }
}
