//! Storage backend whose writes fail for chosen keys.

use std::collections::HashSet;

use super::{MemoryStorage, StorageError, StoragePort};

/// Wraps [`MemoryStorage`]; `set` and `remove` on a broken key fail with
/// `StorageError::Unavailable` and leave the stored value as it was.
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    broken: HashSet<String>,
}

impl FailingStorage {
    #[must_use]
    pub fn new<'k>(broken: impl IntoIterator<Item = &'k str>) -> Self {
        Self {
            inner: MemoryStorage::new(),
            broken: broken.into_iter().map(str::to_owned).collect(),
        }
    }

    /// Write directly to the backing map, bypassing the failure rule.
    pub fn seed(&self, key: &str, value: &str) {
        let _ = self.inner.set(key, value);
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.broken.contains(key) {
            return Err(StorageError::Unavailable(format!("write to {key} refused")));
        }
        Ok(())
    }
}

impl StoragePort for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}
