//! Lifecycle operations: init, per-tick update, external changes, shutdown.

use std::collections::BTreeMap;

use panorama_common::{new_claim_token, SurfaceId};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use super::types::{RegistryState, SurfaceRegistry};
use crate::directory::smallest_free_id;
use crate::record::SurfaceRecord;

impl SurfaceRegistry {
    /// Claim an id and publish this window with `metadata`.
    ///
    /// Calling `init` on an active registry is ignored. After `shutdown`,
    /// `init` claims a fresh id.
    pub fn init(&mut self, metadata: Value) {
        if self.state == RegistryState::Active {
            warn!(id = ?self.this_id(), "init called on an active registry, ignoring");
            return;
        }

        let records = self.read_directory_or_empty();
        let record = self.claim(&records, metadata);
        info!(id = %record.id, shape = %record.shape, "surface claimed");

        self.state = RegistryState::Active;
        self.reconcile();
    }

    /// One tick: refresh and publish our record, then reconcile.
    ///
    /// Never fails; store errors degrade the tick and are retried next tick.
    pub fn update(&mut self) {
        if self.state != RegistryState::Active {
            trace!(state = ?self.state, "update on inactive registry");
            return;
        }

        // Notifications are only a hint; this tick re-reads everything.
        let drained = self.store.drain_changes().len();
        if drained > 0 {
            trace!(drained, "discarded store notifications");
        }

        self.tick += 1;
        self.check_claim();
        self.refresh_shape();

        if let Some(own) = self.own.as_mut() {
            own.beat += 1;
        }
        self.publish();
        self.reconcile();
    }

    /// Handle notifications that arrived between ticks.
    ///
    /// Re-reconciles from the store (not from the payloads) if any surface
    /// key changed. Returns whether a reconciliation ran.
    pub fn process_external_changes(&mut self) -> bool {
        if self.state != RegistryState::Active {
            return false;
        }
        let changes = self.store.drain_changes();
        let relevant = changes
            .iter()
            .filter(|c| self.directory.owns_key(&c.key))
            .count();
        if relevant == 0 {
            return false;
        }
        debug!(relevant, "surface records changed externally");
        self.reconcile();
        true
    }

    /// Remove our record from the store and stop participating.
    ///
    /// Best-effort: other participants prune us by timeout anyway.
    pub fn shutdown(&mut self) {
        if self.state != RegistryState::Active {
            return;
        }
        if let Some(own) = self.own.take() {
            // Only delete the key if the claim there is still ours.
            match self.directory.read_one(&*self.store, own.id) {
                Ok(Some(stored)) if stored.token != own.token => {
                    debug!(id = %own.id, "claim already taken over, leaving key in place");
                }
                Ok(_) => {
                    if let Err(e) = self.directory.remove(&*self.store, own.id) {
                        warn!(id = %own.id, "failed to remove surface on shutdown: {e}");
                    }
                }
                Err(e) => warn!(id = %own.id, "failed to read surface on shutdown: {e}"),
            }
            info!(id = %own.id, "surface released");
        }
        self.state = RegistryState::Closed;
        self.windows.clear();
        self.liveness = Default::default();
    }

    // -- Internals --

    pub(super) fn read_directory_or_empty(&self) -> BTreeMap<SurfaceId, SurfaceRecord> {
        match self.directory.read_all(&*self.store) {
            Ok(records) => records,
            Err(e) => {
                warn!("failed to read surface directory, assuming empty: {e}");
                BTreeMap::new()
            }
        }
    }

    /// Take the smallest free id with a fresh token and publish it.
    fn claim(
        &mut self,
        records: &BTreeMap<SurfaceId, SurfaceRecord>,
        metadata: Value,
    ) -> SurfaceRecord {
        let record = SurfaceRecord {
            id: smallest_free_id(records.keys()),
            token: new_claim_token(),
            beat: 0,
            shape: self.shape_source.shape(),
            metadata,
        };
        self.own = Some(record.clone());
        self.publish();
        record
    }

    /// Detect another participant overwriting our key (an id race) and
    /// re-claim. The last writer keeps the id.
    fn check_claim(&mut self) {
        let Some(own) = self.own.as_ref() else {
            return;
        };
        let lost = match self.directory.read_one(&*self.store, own.id) {
            Ok(Some(stored)) => stored.token != own.token,
            // Missing: wiped or pruned. Republishing restores it.
            Ok(None) => false,
            Err(e) => {
                debug!("claim check skipped: {e}");
                false
            }
        };
        if !lost {
            return;
        }

        let old_id = own.id;
        let metadata = own.metadata.clone();
        let records = match self.directory.read_all(&*self.store) {
            Ok(records) => records,
            Err(e) => {
                debug!("re-claim deferred: {e}");
                return;
            }
        };
        let record = self.claim(&records, metadata);
        warn!(old = %old_id, new = %record.id, "surface id taken by another window, re-claimed");
    }

    fn refresh_shape(&mut self) {
        let shape = self.shape_source.shape();
        let Some(own) = self.own.as_mut() else {
            return;
        };
        if own.shape == shape {
            return;
        }
        debug!(id = %own.id, from = %own.shape, to = %shape, "own shape changed");
        own.shape = shape;
        if let Some(cb) = self.on_shape_changed.as_mut() {
            cb(&shape);
        }
    }

    fn publish(&self) {
        let Some(own) = self.own.as_ref() else {
            return;
        };
        if let Err(e) = self.directory.write(&*self.store, own) {
            warn!(id = %own.id, "failed to publish surface: {e}");
        }
    }
}
