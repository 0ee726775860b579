use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::engine::DEFAULT_WPM;
use crate::error::{Result, StoreError};

/// Persisted user preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub last_used_wpm: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_used_wpm: DEFAULT_WPM,
        }
    }
}

impl Config {
    /// Stored rate, or the default if the stored one is unusable
    pub fn wpm(&self) -> i64 {
        if self.last_used_wpm > 0 {
            self.last_used_wpm
        } else {
            DEFAULT_WPM
        }
    }
}

pub trait ConfigStore {
    fn try_load(&self) -> Result<Config>;
    fn save(&self, cfg: &Config) -> Result<()>;

    /// Best-effort load: any failure yields the defaults
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(err) => {
                debug!(%err, "using default config");
                Config::default()
            }
        }
    }

    fn last_used_wpm(&self) -> i64 {
        self.load().wpm()
    }

    /// Fire-and-forget write of the rate preference
    fn set_last_used_wpm(&self, wpm: i64) {
        let mut cfg = self.load();
        cfg.last_used_wpm = wpm;
        if let Err(err) = self.save(&cfg) {
            warn!(%err, wpm, "failed to persist rate");
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: Option<PathBuf>,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: Some(p.as_ref().to_path_buf()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config> {
        let path = self.path.as_ref().ok_or(StoreError::NoLocation)?;
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        let path = self.path.as_ref().ok_or(StoreError::NoLocation)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    cfg: Arc<Mutex<Option<Config>>>,
}

impl MemoryConfigStore {
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg: Arc::new(Mutex::new(Some(cfg))),
        }
    }

    pub fn stored(&self) -> Option<Config> {
        self.cfg
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn try_load(&self) -> Result<Config> {
        Ok(self.stored().unwrap_or_default())
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        *self
            .cfg
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(cfg.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_falls_back_to_default_rate() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_matches!(store.try_load(), Err(StoreError::Io(_)));
        assert_eq!(store.last_used_wpm(), 300);
    }

    #[test]
    fn corrupt_file_falls_back_to_default_rate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_matches!(store.try_load(), Err(StoreError::Malformed(_)));
        assert_eq!(store.last_used_wpm(), 300);
    }

    #[test]
    fn set_last_used_wpm_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        store.set_last_used_wpm(475);

        let reopened = FileConfigStore::with_path(&path);
        assert_eq!(reopened.last_used_wpm(), 475);
    }

    #[test]
    fn non_positive_stored_rate_uses_default() {
        let store = MemoryConfigStore::with_config(Config { last_used_wpm: 0 });
        assert_eq!(store.last_used_wpm(), 300);
        let store = MemoryConfigStore::with_config(Config { last_used_wpm: -40 });
        assert_eq!(store.last_used_wpm(), 300);
    }

    #[test]
    fn unknown_and_missing_fields_are_tolerated() {
        let cfg: Config = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(cfg, Config::default());
        let cfg: Config = serde_json::from_str(r#"{"last_used_wpm": 650}"#).unwrap();
        assert_eq!(cfg.wpm(), 650);
    }

    #[test]
    fn save_without_location_is_reported_not_fatal() {
        let store = FileConfigStore { path: None };
        assert_matches!(store.save(&Config::default()), Err(StoreError::NoLocation));
        // best-effort paths swallow the failure
        store.set_last_used_wpm(500);
        assert_eq!(store.last_used_wpm(), 300);
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryConfigStore::default();
        let handle = store.clone();
        assert!(store.stored().is_none());
        handle.set_last_used_wpm(725);
        assert_eq!(store.last_used_wpm(), 725);
    }
}
