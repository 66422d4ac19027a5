mod file_store;
#[cfg(feature = "web")]
mod local;
mod memory;

pub use file_store::{FileStore, STICKYWALL_DIR, STORAGE_FILE};
#[cfg(feature = "web")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

use crate::entity::Note;
use crate::error::Result;

/// String key-value storage, shaped like the browser storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`. Either the whole write lands or an
    /// error is returned.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Persists the full note list under a single key.
pub struct NoteStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NoteStorage<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the stored note list.
    ///
    /// Absent, unreadable or malformed data yields an empty list.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored notes");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                tracing::debug!(key = %self.key, count = notes.len(), "loaded notes");
                notes
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring malformed stored notes");
                Vec::new()
            }
        }
    }

    /// Serialize and write the full list, replacing any prior value.
    pub fn save(&mut self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)?;
        self.store.set_item(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = notes.len(), bytes = json.len(), "saved notes");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
