//! Idempotent content registration
//!
//! Helpers that add shared content ("the passive every subclass grants")
//! go through a [`Registry`] so the content is emitted once per build and
//! every caller gets the same identifier back.

use indexmap::IndexMap;

/// Content key to generated identifier, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the identifier registered for `key`, creating it with `create`
    /// on first use. `create` is not called again once it has succeeded.
    ///
    /// # Errors
    /// Propagates the error from `create`; nothing is registered then.
    pub fn ensure<E, F>(&mut self, key: &str, create: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(id) = self.entries.get(key) {
            return Ok(id.clone());
        }
        let id = create()?;
        tracing::debug!("Registered '{}' as '{}'", key, id);
        self.entries.insert(key.to_string(), id.clone());
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, key: &str, id: String) {
        self.entries.insert(key.to_string(), id);
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
