//! `localStorage` behind the save store seam

use game_core::Environment;
use persist::{KeyValueStore, MemoryStore};
use web_sys::Storage;

/// `localStorage` when the page has it, otherwise a session-only map
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(env: &dyn Environment) -> Self {
        match local_storage() {
            Ok(storage) => BrowserStore::Local(storage),
            Err(e) => {
                env.log(format!("{e}; saves will not survive a reload"));
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    window
        .local_storage()
        .map_err(|e| format!("Failed to open localStorage: {:?}", e))?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            BrowserStore::Local(storage) => storage
                .get_item(key)
                .map_err(|e| format!("Failed to read {key}: {:?}", e)),
            BrowserStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match self {
            BrowserStore::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| format!("Failed to write {key}: {:?}", e)),
            BrowserStore::Memory(store) => store.set(key, value),
        }
    }
}
