//! Directory-backed store shared by separate processes.
//!
//! Every key lives in its own file inside one directory. Writes go through a
//! temp file and a rename so readers never see a half-written value.
//!
//! Change detection diffs the directory against the last contents this
//! handle knew about. A `notify` watcher tells the handle *when* to diff;
//! without one (watcher setup failed, or [`FileStore::open_unwatched`]) the
//! directory is diffed on every drain. Own writes update the known contents
//! immediately, so they never come back as changes.

mod names;
mod watcher;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::RecommendedWatcher;
use panorama_common::{new_short_id, StoreError};
use tracing::{debug, info, warn};

use crate::{Result, SharedStore, StoreChange};

use names::{decode_key, encode_key};

pub struct FileStore {
    dir: PathBuf,
    known: RefCell<HashMap<String, String>>,
    events: Option<Receiver<PathBuf>>,
    _watcher: Option<RecommendedWatcher>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir` and watch it.
    ///
    /// A watcher failure is logged and the store falls back to diffing on
    /// every drain.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::open_unwatched(dir)?;

        let (tx, rx) = mpsc::channel();
        match watcher::watch_dir(&store.dir, tx) {
            Ok(w) => {
                store.events = Some(rx);
                store._watcher = Some(w);
            }
            Err(e) => {
                warn!("store watcher unavailable, polling instead: {e}");
            }
        }

        info!("opened file store at {}", store.dir.display());
        Ok(store)
    }

    /// Open without a watcher; every [`SharedStore::drain_changes`] diffs
    /// the directory.
    pub fn open_unwatched(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Io(format!("failed to create store dir {}: {e}", dir.display()))
        })?;

        let store = Self {
            dir,
            known: RefCell::new(HashMap::new()),
            events: None,
            _watcher: None,
        };
        let snapshot = store.scan()?;
        *store.known.borrow_mut() = snapshot;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }

    fn read_file(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(StoreError::Encoding(format!("{}: {e}", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(key) = entry.file_name().to_str().and_then(decode_key) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// Current directory contents. Files that vanish mid-scan are skipped.
    fn scan(&self) -> Result<HashMap<String, String>> {
        let mut contents = HashMap::new();
        for key in self.list_keys()? {
            match Self::read_file(&self.path_for(&key)) {
                Ok(Some(value)) => {
                    contents.insert(key, value);
                }
                Ok(None) => {}
                Err(e) => debug!(key, "skipping unreadable store file: {e}"),
            }
        }
        Ok(contents)
    }

    fn events_pending(&self) -> bool {
        match &self.events {
            Some(rx) => rx.try_iter().count() > 0,
            None => true,
        }
    }
}

impl SharedStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Self::read_file(&self.path_for(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", encode_key(key), new_short_id()));

        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        self.known
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.known.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.list_keys()
    }

    fn clear(&self) -> Result<()> {
        for key in self.list_keys()? {
            self.remove(&key)?;
        }
        Ok(())
    }

    fn drain_changes(&self) -> Vec<StoreChange> {
        if !self.events_pending() {
            return Vec::new();
        }

        let current = match self.scan() {
            Ok(current) => current,
            Err(e) => {
                warn!("failed to scan store dir {}: {e}", self.dir.display());
                return Vec::new();
            }
        };

        let mut known = self.known.borrow_mut();
        let mut changes: Vec<StoreChange> = current
            .iter()
            .filter(|(key, value)| known.get(*key) != Some(*value))
            .map(|(key, value)| StoreChange::new(key.clone(), Some(value.clone())))
            .collect();
        changes.extend(
            known
                .keys()
                .filter(|key| !current.contains_key(*key))
                .map(|key| StoreChange::new(key.clone(), None)),
        );
        changes.sort_by(|a, b| a.key.cmp(&b.key));

        *known = current;
        changes
    }
}
