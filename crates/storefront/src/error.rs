//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the entry points. Internal errors are
//! captured to Sentry by [`AppError::report`] before a message is shown.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error is a fault of the application rather than the user.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Storage(_) => true,
            Self::Auth(err) => !err.is_user_error(),
            Self::Config(_) | Self::BadRequest(_) => false,
        }
    }

    /// Message safe to show to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose internal error details to users
        match self {
            Self::Storage(_) => "Something went wrong (error). Please try again.".to_string(),
            Self::Auth(err) => err.user_message(),
            Self::Config(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Capture internal errors to Sentry and log them; return the user message.
    pub fn report(&self) -> String {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::warn!(error = %self, "Command rejected");
        }
        self.user_message()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str, name: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(email.to_string()),
            email: Some(email.to_string()),
            username: name.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item to cart", Some(&[("name", "Linen Kurta")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::ValidationError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("index must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: index must be a number");

        let err = AppError::Storage(StorageError::Unavailable("disk full".to_string()));
        assert!(err.to_string().starts_with("Storage error: "));
    }

    #[test]
    fn test_app_error_classification() {
        assert!(AppError::Storage(StorageError::Unavailable("x".to_string())).is_internal());
        assert!(!AppError::BadRequest("x".to_string()).is_internal());
        assert!(!AppError::Auth(AuthError::InvalidCredentials).is_internal());
        assert!(AppError::Auth(AuthError::PasswordHash("x".to_string())).is_internal());
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::Storage(StorageError::InvalidKey("../secret".to_string()));
        assert!(!err.user_message().contains("secret"));

        let err = AppError::Auth(AuthError::Validation(ValidationError::PasswordMismatch));
        assert_eq!(err.user_message(), "Passwords do not match.");
    }

    #[test]
    fn test_report_without_sentry_client() {
        let err = AppError::Storage(StorageError::Unavailable("unreachable backend".to_string()));
        assert_eq!(
            err.report(),
            "Something went wrong (error). Please try again."
        );
        add_breadcrumb("cart", "noop without client", None);
        set_sentry_user("a@b.in", Some("A"));
        clear_sentry_user();
    }
}
