//! File-backed best-time storage

use log::debug;
use nqueens_core::{BestTimes, BestTimesStore, StoreError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Best times kept as pretty-printed JSON in the data directory
pub struct FileBestTimesStore {
    path: PathBuf,
    cache: Mutex<Option<BestTimes>>,
}

impl FileBestTimesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<BestTimes, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no best times at {}", self.path.display());
                return Ok(BestTimes::new());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|e| StoreError::Format(e.to_string()))
    }
}

impl BestTimesStore for FileBestTimesStore {
    fn load(&self) -> Result<BestTimes, StoreError> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|e| StoreError::Format(e.to_string()))?;
        if let Some(ref times) = *cache {
            return Ok(times.clone());
        }

        let times = self.read_file()?;
        *cache = Some(times.clone());
        Ok(times)
    }

    fn save(&self, times: &BestTimes) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(times).map_err(|e| StoreError::Format(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        debug!("saved {} best times to {}", times.len(), self.path.display());

        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(times.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nqueens-test-{}-{}", std::process::id(), name))
            .join("best.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = FileBestTimesStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_from_new_store() {
        let path = temp_path("roundtrip");
        let store = FileBestTimesStore::new(&path);

        let mut times = BestTimes::new();
        times.record(4, 12.0);
        times.record(8, 95.5);
        store.save(&times).unwrap();

        let reopened = FileBestTimesStore::new(&path);
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.get(4), Some(12.0));
        assert_eq!(loaded.get(8), Some(95.5));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = FileBestTimesStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Format(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
