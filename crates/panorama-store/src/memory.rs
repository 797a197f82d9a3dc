//! In-process store shared through a [`MemoryBus`].
//!
//! Each [`MemoryStore`] handle plays one participant. Notifications are
//! queued per handle and only delivered when that handle drains them, so a
//! test decides exactly when every participant "hears" about a write.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use panorama_common::StoreError;
use tracing::{trace, warn};

use crate::{Result, SharedStore, StoreChange};

struct BusInner {
    entries: BTreeMap<String, String>,
    queues: HashMap<u64, VecDeque<StoreChange>>,
    next_handle: u64,
    available: bool,
    /// Total bytes of keys plus values the bus accepts.
    quota: Option<usize>,
}

impl BusInner {
    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn notify_others(&mut self, origin: Option<u64>, change: StoreChange) {
        for (handle, queue) in self.queues.iter_mut() {
            if Some(*handle) != origin {
                queue.push_back(change.clone());
            }
        }
    }
}

/// The shared medium. Cheap to clone; clones refer to the same map.
#[derive(Clone)]
pub struct MemoryBus {
    inner: Arc<Mutex<BusInner>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                entries: BTreeMap::new(),
                queues: HashMap::new(),
                next_handle: 0,
                available: true,
                quota: None,
            })),
        }
    }

    /// Attach a new participant.
    ///
    /// Handle bookkeeping survives a poisoned lock, so every handle gets its
    /// own queue even then.
    pub fn connect(&self) -> MemoryStore {
        let mut inner = self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("memory bus lock poisoned, recovering for connect");
            poisoned.into_inner()
        });
        let handle = inner.next_handle;
        inner.next_handle += 1;
        inner.queues.insert(handle, VecDeque::new());
        drop(inner);

        MemoryStore {
            bus: self.clone(),
            handle,
        }
    }

    /// Simulate the medium going away (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        if let Ok(mut inner) = self.lock() {
            inner.available = available;
        }
    }

    /// Cap the total stored bytes; writes past the cap fail with
    /// [`StoreError::QuotaExceeded`].
    pub fn set_quota(&self, bytes: Option<usize>) {
        if let Ok(mut inner) = self.lock() {
            inner.quota = bytes;
        }
    }

    /// Write as an outside party (every handle is notified). Bypasses
    /// availability and quota; used to plant corrupt or foreign records.
    pub fn inject(&self, key: &str, value: &str) {
        if let Ok(mut inner) = self.lock() {
            inner.entries.insert(key.to_string(), value.to_string());
            inner.notify_others(None, StoreChange::new(key, Some(value.to_string())));
        }
    }

    /// Wipe the medium as an outside party, like a user clearing site data.
    pub fn reset(&self) {
        if let Ok(mut inner) = self.lock() {
            let keys: Vec<String> = inner.entries.keys().cloned().collect();
            inner.entries.clear();
            for key in keys {
                inner.notify_others(None, StoreChange::new(key, None));
            }
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().map(|inner| inner.entries.clone()).unwrap_or_default()
    }

    /// Number of notifications waiting for `store`.
    pub fn pending_for(&self, store: &MemoryStore) -> usize {
        self.lock()
            .ok()
            .and_then(|inner| inner.queues.get(&store.handle).map(VecDeque::len))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BusInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))
    }

    fn lock_available(&self) -> Result<MutexGuard<'_, BusInner>> {
        let inner = self.lock()?;
        if !inner.available {
            return Err(StoreError::Unavailable("memory bus offline".to_string()));
        }
        Ok(inner)
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One participant's view of a [`MemoryBus`].
pub struct MemoryStore {
    bus: MemoryBus,
    handle: u64,
}

impl MemoryStore {
    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.bus.lock() {
            inner.queues.remove(&self.handle);
        }
    }
}

impl SharedStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let inner = self.bus.lock_available()?;
        Ok(inner.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.bus.lock_available()?;

        if let Some(quota) = inner.quota {
            let current = inner.entries.get(key).map_or(0, |v| key.len() + v.len());
            if inner.used_bytes() - current + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        let previous = inner.entries.insert(key.to_string(), value.to_string());
        // Rewriting an identical value is silent, as with browser storage.
        if previous.as_deref() != Some(value) {
            trace!(key, handle = self.handle, "memory store write");
            inner.notify_others(
                Some(self.handle),
                StoreChange::new(key, Some(value.to_string())),
            );
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.bus.lock_available()?;
        if inner.entries.remove(key).is_some() {
            inner.notify_others(Some(self.handle), StoreChange::new(key, None));
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let inner = self.bus.lock_available()?;
        Ok(inner.entries.keys().cloned().collect())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.bus.lock_available()?;
        let keys: Vec<String> = inner.entries.keys().cloned().collect();
        inner.entries.clear();
        for key in keys {
            inner.notify_others(Some(self.handle), StoreChange::new(key, None));
        }
        Ok(())
    }

    fn drain_changes(&self) -> Vec<StoreChange> {
        match self.bus.lock() {
            Ok(mut inner) => inner
                .queues
                .get_mut(&self.handle)
                .map(|queue| queue.drain(..).collect())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}
