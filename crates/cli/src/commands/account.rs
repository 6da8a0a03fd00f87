//! Account and session commands.
//!
//! # Environment Variables
//!
//! - `PASHLE_PASSWORD` - Password for `register` and `login`
//! - `PASHLE_PASSWORD_CONFIRM` - Confirmation for `register`

use secrecy::SecretString;
use tracing::info;

use pashle_storefront::error::{self, AppError};
use pashle_storefront::services::Registration;
use pashle_storefront::state::AppState;

const PASSWORD_VAR: &str = "PASHLE_PASSWORD";
const CONFIRM_VAR: &str = "PASHLE_PASSWORD_CONFIRM";

/// Read a secret from the environment. Unset reads as empty so the form
/// rules report it.
fn secret_from_env(key: &str) -> SecretString {
    SecretString::from(std::env::var(key).unwrap_or_default())
}

/// Register a new account and log it in.
pub async fn register(state: &AppState, name: String, email: String) -> Result<(), AppError> {
    let form = Registration {
        name,
        email,
        password: secret_from_env(PASSWORD_VAR),
        confirm_password: secret_from_env(CONFIRM_VAR),
    };

    let identity = state.credentials().register(&form).await?;
    error::set_sentry_user(identity.email.as_str(), Some(&identity.name));
    info!("Account created. Welcome, {}!", identity.first_name().unwrap_or("friend"));
    Ok(())
}

/// Log in with the password from the environment.
pub async fn login(state: &AppState, email: &str) -> Result<(), AppError> {
    let identity = state
        .credentials()
        .verify(email, &secret_from_env(PASSWORD_VAR))
        .await?;
    error::set_sentry_user(identity.email.as_str(), Some(&identity.name));
    info!("Logged in as {} <{}>", identity.name, identity.email);
    Ok(())
}

/// Clear the active session.
pub fn logout(state: &AppState) -> Result<(), AppError> {
    state.session().clear()?;
    error::clear_sentry_user();
    info!("Logged out");
    Ok(())
}

/// Print the navbar greeting, or that nobody is logged in.
pub fn whoami(state: &AppState) {
    match state.session().get() {
        Some(identity) => {
            let greeting = state.session().greeting().unwrap_or_else(|| "Hi".to_owned());
            info!("{greeting} ({})", identity.email);
        }
        None => info!("Not logged in"),
    }
}
