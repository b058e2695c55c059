//! Implements the `KeyValueStore` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so that the whole flow can
//! be exercised without a data directory.

use crate::kv::KeyValueStore;
use crate::Result;
use std::collections::HashMap;

/// An implementation of the `KeyValueStore` trait that holds its values in a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `MemoryStore` that already holds `value` under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Look at a stored value without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
