use bevy_pkv::{GetError, PkvStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(test)]
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("stored value for '{key}' is not valid: {source}")]
    Parse {
        key: String,
        source: serde_json::Error,
    },
    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },
}

/// String-valued key/value storage that outlives the process.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl PreferenceStore for PkvStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.get::<String>(key) {
            Ok(value) => Some(value),
            Err(GetError::NotFound) => None,
            Err(err) => {
                tracing::warn!("failed to read stored '{key}': {err}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_string(key, value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub values: HashMap<String, String>,
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_json<T: DeserializeOwned>(
    store: &impl PreferenceStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(text) = store.read(key) else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Parse {
            key: key.to_string(),
            source,
        })
}

pub fn save_json<T: Serialize>(
    store: &mut impl PreferenceStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &text)
}
