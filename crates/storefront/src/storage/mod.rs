//! Key-value storage port.
//!
//! All persisted state lives under three keys, each holding one JSON
//! document that is rewritten in full on every mutation:
//!
//! | Key | Content |
//! |---|---|
//! | `{prefix}Users` | ordered list of registered users |
//! | `{prefix}Auth` | the active session identity, or absent |
//! | `{prefix}Cart` | ordered list of cart line items |
//!
//! Reads go through [`read_json`], which folds "absent" and "corrupt" into a
//! single `None` outcome. Writes go through [`write_json`] and report
//! failures to the caller.

mod file;
mod memory;

#[cfg(test)]
pub(crate) mod failing;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Default key prefix.
pub const DEFAULT_PREFIX: &str = "pashle";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend is not usable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store scoped to one profile.
///
/// Implementations must be `Send + Sync` so a single backend can be shared
/// through [`crate::state::AppState`].
pub trait StoragePort: Send + Sync {
    /// Read the raw value stored under `key`. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The storage keys used by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key of the registered user list.
    pub users: String,
    /// Key of the active session.
    pub session: String,
    /// Key of the cart.
    pub cart: String,
}

impl StorageKeys {
    /// Build the key set for a prefix (e.g. `pashle` -> `pashleUsers`).
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            users: format!("{prefix}Users"),
            session: format!("{prefix}Auth"),
            cart: format!("{prefix}Cart"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

/// Read and decode the JSON document stored under `key`.
///
/// Returns `None` when the key is absent, the backend fails, or the stored
/// text is not a valid document of type `T`. Failures are logged at warn
/// level and never propagated.
pub fn read_json<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "storage read failed");
            return None;
        }
    };

    parse_json(key, &raw)
}

/// Decode raw text read from `key`, logging and discarding malformed input.
pub fn parse_json<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored document");
            None
        }
    }
}

/// Read the JSON array stored under `key`, decoding each entry on its own.
///
/// A document that is not an array reads as empty. Entries that do not
/// decode as `T` are skipped with a warning; the rest are kept in order.
#[must_use]
pub fn read_json_list<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Vec<T> {
    let entries: Vec<Value> = read_json(storage, key).unwrap_or_default();
    decode_entries(key, &entries)
}

/// Decode each entry of a stored array, skipping the ones that do not fit `T`.
#[must_use]
pub fn decode_entries<T: DeserializeOwned>(key: &str, entries: &[Value]) -> Vec<T> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match T::deserialize(entry) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping unreadable stored entry");
                None
            }
        })
        .collect()
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn StoragePort,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_with_default_prefix() {
        let keys = StorageKeys::default();
        assert_eq!(keys.users, "pashleUsers");
        assert_eq!(keys.session, "pashleAuth");
        assert_eq!(keys.cart, "pashleCart");
    }

    #[test]
    fn test_read_json_absent_is_none() {
        let storage = MemoryStorage::new();
        assert!(read_json::<Vec<u32>>(&storage, "missing").is_none());
    }

    #[test]
    fn test_read_json_corrupt_is_none() {
        let storage = MemoryStorage::new();
        storage.set("k", "{not json").unwrap();
        assert!(read_json::<Vec<u32>>(&storage, "k").is_none());
    }

    #[test]
    fn test_read_json_wrong_shape_is_none() {
        let storage = MemoryStorage::new();
        storage.set("k", r#"{"a": 1}"#).unwrap();
        assert!(read_json::<Vec<u32>>(&storage, "k").is_none());
    }

    #[test]
    fn test_read_json_list_skips_bad_entries() {
        let storage = MemoryStorage::with_entries([("k", r#"[1, "two", 3, null, -4]"#)]);
        assert_eq!(read_json_list::<u32>(&storage, "k"), vec![1, 3]);
    }

    #[test]
    fn test_read_json_list_non_array_is_empty() {
        for raw in ["{", r#"{"a": 1}"#, "7", "null"] {
            let storage = MemoryStorage::with_entries([("k", raw)]);
            assert!(read_json_list::<u32>(&storage, "k").is_empty(), "raw = {raw}");
        }
    }

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        write_json(&storage, "k", &[1u32, 2, 3]).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(read_json::<Vec<u32>>(&storage, "k"), Some(vec![1, 2, 3]));
    }
}
