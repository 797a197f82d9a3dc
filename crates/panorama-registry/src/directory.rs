//! Layout of surface records inside the shared store.
//!
//! One key per surface, `<prefix><id>`, so every key has exactly one writer.

use std::collections::BTreeMap;

use panorama_common::{StoreError, SurfaceId};
use panorama_store::{Result, SharedStore};
use tracing::debug;

use crate::record::SurfaceRecord;

#[derive(Debug, Clone)]
pub struct Directory {
    prefix: String,
}

impl Directory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key_for(&self, id: SurfaceId) -> String {
        format!("{}{}", self.prefix, id.0)
    }

    /// Id encoded in `key`, if it is a canonical surface key.
    pub fn parse_key(&self, key: &str) -> Option<SurfaceId> {
        let id = SurfaceId(key.strip_prefix(&self.prefix)?.parse().ok()?);
        (self.key_for(id) == key).then_some(id)
    }

    pub fn owns_key(&self, key: &str) -> bool {
        self.parse_key(key).is_some()
    }

    /// Every well-formed record in the store, by id.
    ///
    /// Missing keys (never written, or wiped externally) simply do not
    /// appear. Malformed records and records filed under the wrong key are
    /// skipped.
    pub fn read_all(&self, store: &dyn SharedStore) -> Result<BTreeMap<SurfaceId, SurfaceRecord>> {
        let mut records = BTreeMap::new();
        for key in store.keys()? {
            let Some(id) = self.parse_key(&key) else {
                continue;
            };
            let Some(raw) = store.read(&key)? else {
                continue;
            };
            if let Some(record) = Self::decode(id, &key, &raw) {
                records.insert(id, record);
            }
        }
        Ok(records)
    }

    pub fn read_one(&self, store: &dyn SharedStore, id: SurfaceId) -> Result<Option<SurfaceRecord>> {
        let key = self.key_for(id);
        Ok(store
            .read(&key)?
            .and_then(|raw| Self::decode(id, &key, &raw)))
    }

    pub fn write(&self, store: &dyn SharedStore, record: &SurfaceRecord) -> Result<()> {
        let raw =
            serde_json::to_string(record).map_err(|e| StoreError::Encoding(e.to_string()))?;
        store.write(&self.key_for(record.id), &raw)
    }

    pub fn remove(&self, store: &dyn SharedStore, id: SurfaceId) -> Result<()> {
        store.remove(&self.key_for(id))
    }

    fn decode(id: SurfaceId, key: &str, raw: &str) -> Option<SurfaceRecord> {
        match serde_json::from_str::<SurfaceRecord>(raw) {
            Ok(record) if record.id == id => Some(record),
            Ok(record) => {
                debug!(key, found = %record.id, "record filed under the wrong key");
                None
            }
            Err(e) => {
                debug!(key, "skipping malformed surface record: {e}");
                None
            }
        }
    }
}

/// Smallest non-negative id not present in `taken`.
pub fn smallest_free_id<'a>(taken: impl IntoIterator<Item = &'a SurfaceId>) -> SurfaceId {
    let mut ids: Vec<u32> = taken.into_iter().map(|id| id.0).collect();
    ids.sort_unstable();
    ids.dedup();
    let mut candidate = 0;
    for id in ids {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    SurfaceId(candidate)
}
