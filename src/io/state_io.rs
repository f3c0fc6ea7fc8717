use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::io::atomic::atomic_write;
use crate::model::list::List;
use crate::model::store::TaskStore;
use crate::model::tag::Tag;
use crate::model::task::Task;
use crate::model::view::View;
use crate::ops::seed::seed_store;

pub const TASKS_KEY: &str = "taskTrackerTasks";
pub const LISTS_KEY: &str = "taskTrackerLists";
pub const TAGS_KEY: &str = "taskTrackerTags";
pub const POMODORO_KEY: &str = "pomodoroCompletedCount";
pub const VIEW_KEY: &str = "taskTrackerCurrentView";

/// Error type for state persistence
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not read {key}: {source}")]
    ReadError {
        key: String,
        source: std::io::Error,
    },
    #[error("could not write {key}: {source}")]
    WriteError {
        key: String,
        source: std::io::Error,
    },
    #[error("could not parse {key}: {source}")]
    ParseError {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not serialize {key}: {source}")]
    SerializeError {
        key: String,
        source: serde_json::Error,
    },
}

/// String-keyed storage of JSON blobs
pub trait Storage {
    /// `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StateError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// One `<key>.json` file per entry inside the data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StateError::ReadError {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        let write_err = |source| StateError::WriteError {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        atomic_write(&self.path(key), value.as_bytes()).map_err(write_err)
    }
}

/// In-memory storage, for callers that don't want files
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

fn read_entry<T: DeserializeOwned>(
    storage: &(impl Storage + ?Sized),
    key: &str,
) -> Result<Option<T>, StateError> {
    let Some(text) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StateError::ParseError {
            key: key.to_string(),
            source,
        })
}

type Collections = (Vec<Task>, Vec<List>, Vec<Tag>);

/// `Ok(None)` when none of the three collections has been saved yet
fn read_collections(storage: &(impl Storage + ?Sized)) -> Result<Option<Collections>, StateError> {
    let tasks = read_entry::<Vec<Task>>(storage, TASKS_KEY)?;
    let lists = read_entry::<Vec<List>>(storage, LISTS_KEY)?;
    let tags = read_entry::<Vec<Tag>>(storage, TAGS_KEY)?;
    if tasks.is_none() && lists.is_none() && tags.is_none() {
        return Ok(None);
    }
    Ok(Some((
        tasks.unwrap_or_default(),
        lists.unwrap_or_default(),
        tags.unwrap_or_default(),
    )))
}

/// Load the full state. Never fails: when no collection has been saved, or
/// any of them can't be read, the demonstration data set is used instead.
/// The session counter and the current view fall back to their defaults
/// on their own.
pub fn load_state(storage: &(impl Storage + ?Sized), today: NaiveDate) -> TaskStore {
    let mut store = match read_collections(storage) {
        Ok(Some((tasks, lists, tags))) => TaskStore {
            tasks,
            lists,
            tags,
            ..Default::default()
        },
        Ok(None) => {
            info!("no saved tasks, starting from demo data");
            seed_store(today)
        }
        Err(e) => {
            warn!(error = %e, "could not load saved tasks, falling back to demo data");
            seed_store(today)
        }
    };

    store.completed_pomodoros = read_entry::<u32>(storage, POMODORO_KEY)
        .unwrap_or_else(|e| {
            warn!(error = %e, "ignoring saved pomodoro count");
            None
        })
        .unwrap_or_default();

    store.current_view = read_entry::<View>(storage, VIEW_KEY)
        .unwrap_or_else(|e| {
            warn!(error = %e, "ignoring saved view");
            None
        })
        .unwrap_or_default();

    store
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

fn write_entry<T: Serialize + ?Sized>(
    storage: &mut (impl Storage + ?Sized),
    key: &str,
    value: &T,
) -> Result<(), StateError> {
    let text = serde_json::to_string(value).map_err(|source| StateError::SerializeError {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &text)
}

/// Write a collection, unless it is empty and was never saved before
fn write_collection<T: Serialize>(
    storage: &mut (impl Storage + ?Sized),
    key: &str,
    items: &[T],
) -> Result<(), StateError> {
    if items.is_empty() && storage.get(key)?.is_none() {
        return Ok(());
    }
    write_entry(storage, key, items)
}

/// Write the full state. An empty collection only replaces a saved one, so a
/// fresh data directory never gets empty files; the counter and view are
/// always written.
pub fn save_state(storage: &mut (impl Storage + ?Sized), store: &TaskStore) -> Result<(), StateError> {
    write_collection(storage, TASKS_KEY, &store.tasks)?;
    write_collection(storage, LISTS_KEY, &store.lists)?;
    write_collection(storage, TAGS_KEY, &store.tags)?;
    write_entry(storage, POMODORO_KEY, &store.completed_pomodoros)?;
    write_entry(storage, VIEW_KEY, &store.current_view)?;
    Ok(())
}

/// Save after a mutation. Failures are logged and otherwise ignored; the
/// in-memory state stays authoritative.
pub fn persist(storage: &mut (impl Storage + ?Sized), store: &TaskStore) {
    if let Err(e) = save_state(storage, store) {
        warn!(error = %e, "failed to save state");
    }
}
