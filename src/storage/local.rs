use wasm_bindgen::JsValue;

use super::KeyValueStore;
use crate::error::{Result, StickyError, StorageError};

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Backend("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(backend_error)?
            .ok_or_else(|| StorageError::Backend("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(backend_error)
    }

    /// Quota failures surface as a backend error carrying the DOM exception.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(backend_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}

fn backend_error(value: JsValue) -> StickyError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    StorageError::Backend(message).into()
}
