use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Result, StickyError};

pub const STICKYWALL_DIR: &str = ".stickywall";
pub const STORAGE_FILE: &str = "storage.json";

/// Key-value store kept as one JSON object on disk.
///
/// Every write rewrites the whole file.
pub struct FileStore {
    items: BTreeMap<String, String>,
    path: PathBuf,
}

impl FileStore {
    /// Create `.stickywall/` under `root` with an empty store.
    pub fn init(root: &Path) -> Result<Self> {
        let dir = root.join(STICKYWALL_DIR);

        if dir.exists() {
            return Err(StickyError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;

        let store = Self {
            items: BTreeMap::new(),
            path: dir.join(STORAGE_FILE),
        };
        store.flush()?;

        Ok(store)
    }

    /// Open the store of an existing project.
    ///
    /// An unparseable store file opens as empty and is replaced on the next
    /// write.
    pub fn open(root: &Path) -> Result<Self> {
        let dir = root.join(STICKYWALL_DIR);
        if !dir.is_dir() {
            return Err(StickyError::NotInitialized);
        }

        let path = dir.join(STORAGE_FILE);
        let items = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable store file");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { items, path })
    }

    /// Directory holding the store and the project config.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(STICKYWALL_DIR))
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory equal to disk.
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
