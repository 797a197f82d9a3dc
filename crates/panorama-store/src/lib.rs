//! Shared state store: the only transport between participants.
//!
//! A store is a flat string-to-string map visible to every participant on
//! the machine. Writes made by one participant surface in every *other*
//! participant's [`SharedStore::drain_changes`]; a participant never sees
//! notifications for its own writes.
//!
//! Reads of a key that was never written, or was wiped by an external
//! reset, return `Ok(None)` rather than an error.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::{MemoryBus, MemoryStore};

use panorama_common::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// A change made by another participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    /// New value, or `None` when the key was removed.
    pub new_value: Option<String>,
}

impl StoreChange {
    pub fn new(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: key.into(),
            new_value,
        }
    }
}

/// Key-value medium shared between participants.
pub trait SharedStore {
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Drop every key. Other participants observe one removal per key.
    fn clear(&self) -> Result<()>;

    /// Take the changes other participants made since the last drain.
    ///
    /// Delivery is best-effort and unordered across participants; callers
    /// must re-read the store rather than trust the payloads.
    fn drain_changes(&self) -> Vec<StoreChange>;
}

impl<S: SharedStore + ?Sized> SharedStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn drain_changes(&self) -> Vec<StoreChange> {
        (**self).drain_changes()
    }
}
