//! Recent-search history persisted through a small key-value store.
//!
//! The list is read once when a host starts, rewritten on every committed
//! search and removed on an explicit clear. It is stored as a JSON array of
//! strings under [`HISTORY_KEY`].

use ahash::AHashMap;
use std::path::{Path, PathBuf};

use crate::error::HistoryError;

/// Namespace key the recent-search list lives under.
pub const HISTORY_KEY: &str = "sokoni-recent-searches";

/// Maximum number of remembered searches.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Minimal string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError>;
    fn remove(&mut self, key: &str) -> Result<(), HistoryError>;
}

/// In-memory store for tests and hosts that do not persist anything.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), HistoryError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform data directory for the marketplace, e.g. `~/.local/share/sokoni`.
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("sokoni"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HistoryError + '_ {
    move |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        std::fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(io_error(&path))
    }

    fn remove(&mut self, key: &str) -> Result<(), HistoryError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_error(&path)(e)),
            _ => Ok(()),
        }
    }
}

/// Most-recent-first, deduplicated list of past queries.
#[derive(Debug)]
pub struct RecentSearches<S: KeyValueStore> {
    store: S,
    entries: Vec<String>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    /// Reads the persisted list. A missing entry is an empty history; a
    /// corrupt one is logged and treated as empty.
    pub fn load(store: S) -> Result<Self, HistoryError> {
        let entries = match store.get(HISTORY_KEY)? {
            None => vec![],
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => normalize(entries),
                Err(e) => {
                    tracing::warn!("Ignoring corrupt recent-search history: {}", e);
                    vec![]
                }
            },
        };
        Ok(Self { store, entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Remembers a committed search and persists the updated list.
    ///
    /// The query is trimmed; blank queries are ignored. A repeated query moves
    /// to the front instead of appearing twice.
    pub fn record(&mut self, query: &str) -> Result<(), HistoryError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_owned());
        self.entries.truncate(MAX_RECENT_SEARCHES);

        let encoded = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &encoded)
    }

    /// Forgets every remembered search and removes the persisted entry.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Enforces the list invariants on data read back from storage.
fn normalize(entries: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(MAX_RECENT_SEARCHES);
    for entry in entries {
        if !entry.trim().is_empty() && !normalized.contains(&entry) {
            normalized.push(entry);
        }
    }
    normalized.truncate(MAX_RECENT_SEARCHES);
    normalized
}
