//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pashle_core::Email;

use super::session::Identity;

/// A registered account in the local user list.
///
/// Persisted as `{ name, email, passwordHash, createdAt }`. Records written
/// without `createdAt` still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name as entered at registration.
    pub name: String,
    /// Lowercased email, unique across the list.
    pub email: Email,
    /// Password digest (lowercase SHA-256 hex, or an Argon2 PHC string).
    pub password_hash: String,
    /// When the account was registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// The identity recorded in the session when this user logs in.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_browser_shaped_record() {
        let json = r#"{
            "name": "Asha Rao",
            "email": "asha@pashle.in",
            "passwordHash": "abc123",
            "createdAt": "2025-03-01T10:15:30.123Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Asha Rao");
        assert_eq!(user.email.as_str(), "asha@pashle.in");
        assert_eq!(user.password_hash, "abc123");
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_reads_record_without_created_at() {
        let json = r#"{"name":"Asha","email":"asha@pashle.in","passwordHash":"abc123"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.created_at, None);

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_writes_camel_case_fields() {
        let user = User {
            name: "Asha".to_owned(),
            email: Email::parse("asha@pashle.in").unwrap(),
            password_hash: "h".to_owned(),
            created_at: Some(Utc::now()),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("password_hash").is_none());
    }
}
