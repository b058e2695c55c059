//! The string-keyed store that survives between runs.
//!
//! Values are opaque strings to this module. `FileStore` keeps one file per key on disk and
//! `MemoryStore` keeps everything in a map, which lets the whole program run top-to-bottom without
//! touching the filesystem.

mod file;
mod memory;

use crate::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A durable map from key to string value.
#[async_trait::async_trait]
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` if nothing has ever been stored there.
    async fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing whatever was there.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

