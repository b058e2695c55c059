//! Implements the `KeyValueStore` trait with one file per key inside a directory.

use crate::kv::KeyValueStore;
use crate::{utils, Result};
use anyhow::bail;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Stores each key as `<dir>/<key>.json`. Writes go to a temporary sibling first and are then
/// renamed over the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a `FileStore` rooted at `dir`. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the value for `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(|c: char| c == '/' || c == '\\')
        {
            bail!("Invalid store key '{key}'")
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("get {key} from {}", path.display());
        utils::read_if_exists(&path).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        trace!("set {key} at {}", path.display());
        utils::write(&tmp, value).await?;
        utils::rename(&tmp, &path).await
    }
}
