//! Named snapshots of the color channels, kept in a key-value store.

use std::collections::BTreeMap;

use crate::color::ColorParameters;

/// Namespace for preset keys inside a store shared with other data.
pub const KEY_PREFIX: &str = "julia_viz.preset.";

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset '{0}' not found")]
    NotFound(String),
    #[error("preset name must not be empty")]
    EmptyName,
    #[error("preset '{name}' is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode preset '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("preset storage failed: {0}")]
    Storage(String),
}

/// Persistent string-to-string storage, e.g. `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PresetError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PresetError>;
    fn remove(&mut self, key: &str) -> Result<(), PresetError>;
    fn keys(&self) -> Result<Vec<String>, PresetError>;
}

/// In-process store; nothing survives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PresetError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PresetError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PresetError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PresetError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PresetError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PresetError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PresetError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, PresetError> {
        (**self).keys()
    }
}

/// The opened store, or a [`MemoryStore`] when it could not be opened.
/// Presets then only last until the page is closed.
pub fn store_or_memory<S>(opened: Result<S, PresetError>) -> Box<dyn KeyValueStore>
where
    S: KeyValueStore + 'static,
{
    match opened {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{err}; presets are kept in memory for this session");
            Box::new(MemoryStore::new())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub colors: ColorParameters,
}

fn storage_key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}

fn normalize_name(name: &str) -> Result<&str, PresetError> {
    let name = name.trim();
    if name.is_empty() {
        Err(PresetError::EmptyName)
    } else {
        Ok(name)
    }
}

pub struct PresetLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> PresetLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores `colors` under `name`, replacing any preset with that name.
    pub fn save(&mut self, name: &str, colors: ColorParameters) -> Result<(), PresetError> {
        let name = normalize_name(name)?;
        // The name lives in the key, the value is just `{r, g, b}`.
        let value = serde_json::to_string(&colors).map_err(|source| PresetError::Encode {
            name: name.to_owned(),
            source,
        })?;
        self.store.set(&storage_key(name), &value)?;
        log::info!("saved preset '{name}'");
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Preset, PresetError> {
        let name = normalize_name(name)?;
        let raw = self
            .store
            .get(&storage_key(name))?
            .ok_or_else(|| PresetError::NotFound(name.to_owned()))?;
        let colors: ColorParameters =
            serde_json::from_str(&raw).map_err(|source| PresetError::Malformed {
                name: name.to_owned(),
                source,
            })?;
        Ok(Preset {
            name: name.to_owned(),
            colors,
        })
    }

    pub fn delete(&mut self, name: &str) -> Result<(), PresetError> {
        let name = normalize_name(name)?;
        self.store.remove(&storage_key(name))?;
        log::info!("deleted preset '{name}'");
        Ok(())
    }

    /// Every stored preset name, sorted.
    pub fn names(&self) -> Result<Vec<String>, PresetError> {
        let mut names: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_owned))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PresetLibrary<MemoryStore> {
        PresetLibrary::new(MemoryStore::new())
    }

    #[test]
    fn save_then_load_restores_exact_values() {
        let mut presets = library();
        let saved = ColorParameters::new(12.345, 0.001, 99.999);
        presets.save("X", saved).unwrap();

        let loaded = presets.load("X").unwrap();
        assert_eq!(loaded.name, "X");
        assert_eq!(loaded.colors, saved);
    }

    #[test]
    fn saving_same_name_overwrites() {
        let mut presets = library();
        presets.save("warm", ColorParameters::new(1.0, 2.0, 3.0)).unwrap();
        presets.save("warm", ColorParameters::new(4.0, 5.0, 6.0)).unwrap();
        assert_eq!(presets.names().unwrap(), vec!["warm".to_string()]);
        assert_eq!(
            presets.load("warm").unwrap().colors,
            ColorParameters::new(4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn delete_removes_name_and_load_fails() {
        let mut presets = library();
        presets.save("a", ColorParameters::default()).unwrap();
        presets.save("b", ColorParameters::default()).unwrap();
        presets.delete("a").unwrap();

        assert_eq!(presets.names().unwrap(), vec!["b".to_string()]);
        assert!(matches!(presets.load("a"), Err(PresetError::NotFound(name)) if name == "a"));
    }

    #[test]
    fn names_skip_foreign_keys_and_are_sorted() {
        let mut store = MemoryStore::new();
        store.set("theme", "dark").unwrap();
        let mut presets = PresetLibrary::new(store);
        presets.save("zeta", ColorParameters::default()).unwrap();
        presets.save("alpha", ColorParameters::default()).unwrap();
        assert_eq!(presets.names().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut presets = library();
        assert!(matches!(
            presets.save("   ", ColorParameters::default()),
            Err(PresetError::EmptyName)
        ));
        assert!(presets.names().unwrap().is_empty());
    }

    #[test]
    fn malformed_entry_reports_name() {
        let mut store = MemoryStore::new();
        store.set(&storage_key("broken"), "{\"r\": 1").unwrap();
        let presets = PresetLibrary::new(store);
        let err = presets.load("broken").unwrap_err();
        assert!(matches!(err, PresetError::Malformed { ref name, .. } if name == "broken"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn unavailable_store_falls_back_to_memory() {
        let opened: Result<MemoryStore, _> =
            Err(PresetError::Storage("localStorage is unavailable".into()));
        let mut presets = PresetLibrary::new(store_or_memory(opened));
        presets.save("kept", ColorParameters::new(7.0, 8.0, 9.0)).unwrap();

        assert_eq!(presets.names().unwrap(), vec!["kept".to_string()]);
        assert_eq!(
            presets.load("kept").unwrap().colors,
            ColorParameters::new(7.0, 8.0, 9.0)
        );
    }

    #[test]
    fn opened_store_is_used_as_is() {
        let mut store = MemoryStore::new();
        store.set(&storage_key("old"), r#"{"r": 1.0, "g": 2.0, "b": 3.0}"#).unwrap();
        let presets = PresetLibrary::new(store_or_memory(Ok(store)));
        assert_eq!(presets.names().unwrap(), vec!["old".to_string()]);
    }

    #[test]
    fn stored_value_is_plain_rgb_json() {
        let mut presets = library();
        presets.save("p", ColorParameters::new(1.5, 2.0, 3.0)).unwrap();
        let raw = presets.store().get("julia_viz.preset.p").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"r": 1.5, "g": 2.0, "b": 3.0}));
    }
}
