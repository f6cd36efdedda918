use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::game::types::Statistics;

/// Key under which the statistics record is stored.
pub const STATISTICS_KEY: &str = "ticTacToeHistory";

const SETTINGS_KEY: &str = "settings";

/// A string key-value store holding JSON blobs.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Whether `key` may hold the statistics record: ASCII letters, digits,
/// `-` and `_` only, and not the settings key.
pub fn is_valid_statistics_key(key: &str) -> bool {
    key != SETTINGS_KEY && is_file_safe_key(key)
}

fn is_file_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Volatile store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a value, e.g. to simulate what a previous session left behind.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Store rooted in the platform config directory, or the current
    /// directory when none can be determined.
    pub fn in_config_dir() -> io::Result<Self> {
        Ok(Self::new(ensure_config_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_file_safe_key(key) {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = match self.path_for(key) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "refusing to read");
                return None;
            }
        };
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read stored value");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io.github", "tictactoe", "TicTacToeArcade")
        .map(|p| p.config_dir().to_path_buf())
}

fn ensure_config_dir() -> io::Result<PathBuf> {
    if let Some(dir) = project_config_dir() {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    } else {
        std::env::current_dir()
    }
}

/// Application settings persisted alongside the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_statistics_key")]
    pub statistics_key: String,
    // Absent on first run.
    #[serde(default)]
    pub window_width: Option<i32>,
    #[serde(default)]
    pub window_height: Option<i32>,
}

fn default_statistics_key() -> String {
    STATISTICS_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            statistics_key: default_statistics_key(),
            window_width: None,
            window_height: None,
        }
    }
}

/// Decode a JSON blob, falling back to `T::default()` when absent or malformed.
fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
    S: KeyValueStore + ?Sized,
{
    match store.load(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, using defaults");
                T::default()
            }
        },
        None => {
            debug!(key, "no stored value, using defaults");
            T::default()
        }
    }
}

fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let data = serde_json::to_string(value)?;
    store.save(key, &data)
}

pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> Settings {
    let mut settings: Settings = load_or_default(store, SETTINGS_KEY);
    if !is_valid_statistics_key(&settings.statistics_key) {
        warn!(
            key = %settings.statistics_key,
            "unusable statistics key in settings, using {}",
            STATISTICS_KEY
        );
        settings.statistics_key = default_statistics_key();
    }
    settings
}

pub fn save_settings<S: KeyValueStore + ?Sized>(
    store: &mut S,
    settings: &Settings,
) -> Result<(), StorageError> {
    save_json(store, SETTINGS_KEY, settings)
}

/// Load statistics; missing or malformed records yield all zeros.
pub fn load_statistics<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Statistics {
    load_or_default(store, key)
}

pub fn save_statistics<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    stats: &Statistics,
) -> Result<(), StorageError> {
    save_json(store, key, stats)
}
