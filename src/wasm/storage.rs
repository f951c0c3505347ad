use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::presets::{KeyValueStore, PresetError};

fn storage_err(err: JsValue) -> PresetError {
    PresetError::Storage(format!("{err:?}"))
}

/// `window.localStorage`, shared by everything on the page's origin.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open(window: &Window) -> Result<Self, PresetError> {
        let storage = window
            .local_storage()
            .map_err(storage_err)?
            .ok_or_else(|| PresetError::Storage("localStorage is unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PresetError> {
        self.storage.get_item(key).map_err(storage_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PresetError> {
        self.storage.set_item(key, value).map_err(storage_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), PresetError> {
        self.storage.remove_item(key).map_err(storage_err)
    }

    fn keys(&self) -> Result<Vec<String>, PresetError> {
        let len = self.storage.length().map_err(storage_err)?;
        (0..len)
            .filter_map(|i| self.storage.key(i).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)
    }
}
