use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// A string-keyed local store. Writes replace the given keys and are
/// durable when `put` returns `Ok`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Write all entries in one step
    fn put(&mut self, entries: &[(&str, &str)]) -> io::Result<()>;

    /// Directory holding the store's side files (recovery log), if any
    fn dir(&self) -> Option<&Path> {
        None
    }

    /// Pick up writes made by other processes. Returns true when the
    /// stored entries may have changed.
    fn refresh(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&mut self, entries: &[(&str, &str)]) -> io::Result<()> {
        (**self).put(entries)
    }

    fn dir(&self) -> Option<&Path> {
        (**self).dir()
    }

    fn refresh(&mut self) -> io::Result<bool> {
        (**self).refresh()
    }
}

/// Name of the store file inside the data directory
pub const STORE_FILE: &str = "store.json";

/// JSON object file mapping keys to string values, e.g.
/// `{"tripTitle": "...", "travelDays": "[...]"}`. Key order is kept.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
    entries: IndexMap<String, String>,
    /// File text as last read or written; None when there was no file
    on_disk: Option<String>,
}

impl FileStore {
    /// Open the store in `dir`. A missing file is an empty store. A file
    /// that is not a JSON string map is also treated as empty, after its
    /// raw contents are copied to the recovery log.
    pub fn open(dir: &Path) -> io::Result<Self> {
        let mut store = FileStore {
            dir: dir.to_path_buf(),
            path: dir.join(STORE_FILE),
            entries: IndexMap::new(),
            on_disk: None,
        };
        let text = read_store_file(&store.path)?;
        store.load_text(text);
        Ok(store)
    }

    fn load_text(&mut self, text: Option<String>) {
        self.entries = match &text {
            Some(text) => match serde_json::from_str::<IndexMap<String, String>>(text) {
                Ok(entries) => entries,
                Err(e) => {
                    recovery::log_recovery(
                        &self.dir,
                        RecoveryEntry::now(
                            RecoveryCategory::Parse,
                            "unreadable store file",
                            vec![
                                ("Source".to_string(), STORE_FILE.to_string()),
                                ("Error".to_string(), e.to_string()),
                            ],
                            text.clone(),
                        ),
                    );
                    IndexMap::new()
                }
            },
            None => IndexMap::new(),
        };
        self.on_disk = text;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, entries: &[(&str, &str)]) -> io::Result<()> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        let content = serde_json::to_string_pretty(&next)?;
        fs::create_dir_all(&self.dir)?;
        recovery::atomic_write(&self.path, content.as_bytes())?;
        self.entries = next;
        self.on_disk = Some(content);
        Ok(())
    }

    fn dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }

    /// Re-read the file if its text differs from what this store last saw
    fn refresh(&mut self) -> io::Result<bool> {
        let text = read_store_file(&self.path)?;
        if text == self.on_disk {
            return Ok(false);
        }
        self.load_text(text);
        Ok(true)
    }
}

/// The store file's text, or None when it does not exist
fn read_store_file(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// In-memory store, used by tests and as a scratch backend
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub entries: IndexMap<String, String>,
    /// When set, every `put` fails without changing anything
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        MemoryStore {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fail_writes: false,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, entries: &[(&str, &str)]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::other("writes disabled"));
        }
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}
