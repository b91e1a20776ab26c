use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

use super::StoreError;

/// Durable string-keyed storage holding one serialized collection per key
pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend for development and testing
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing serialization
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: each key lives in `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    fn io_error(key: &str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueBackend for FileBackend {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "Read collection file");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Collection file does not exist yet");
                Ok(None)
            }
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    #[instrument(skip(self, value))]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| Self::io_error(key, e))?;

        // Write beside the target then rename so a failed write never truncates it
        let path = self.path_for(key);
        let staging = self.data_dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&staging, &path).map_err(|e| Self::io_error(key, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote collection file");
        Ok(())
    }
}
