//! Session-related types.

use serde::{Deserialize, Serialize};

use pashle_core::Email;

/// The logged-in identity.
///
/// Minimal data stored in the session to identify the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

impl Identity {
    /// The first space-separated word of the name, used in the navbar greeting.
    ///
    /// Returns `None` when the name is empty.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        if self.name.is_empty() {
            return None;
        }
        self.name.split(' ').next()
    }
}
