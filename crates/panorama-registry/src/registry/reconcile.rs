//! Reconciliation: directory read -> liveness pruning -> ordered list.

use panorama_common::SurfaceId;
use tracing::{debug, info, warn};

use super::types::SurfaceRegistry;
use crate::record::Surface;

impl SurfaceRegistry {
    /// Recompute the window list from the store.
    ///
    /// On a failed read the previous list is kept. The windows-changed
    /// callback fires only when the ordered id list differs.
    pub(super) fn reconcile(&mut self) {
        let mut records = match self.directory.read_all(&*self.store) {
            Ok(records) => records,
            Err(e) => {
                warn!("directory read failed, keeping previous window list: {e}");
                return;
            }
        };

        // We are live to ourselves even if our last write did not land.
        let own_id = self.own.as_ref().map(|own| {
            records.entry(own.id).or_insert_with(|| own.clone());
            own.id
        });

        self.liveness.observe(self.tick, &records);

        let stale: Vec<SurfaceId> = records
            .keys()
            .copied()
            .filter(|id| Some(*id) != own_id)
            .filter(|id| self.liveness.is_stale(*id, self.tick, self.stale_after))
            .collect();

        for id in stale {
            if let Some(record) = records.remove(&id) {
                info!(id = %id, beat = record.beat, "pruning silent surface");
                self.collect_stale(id, &record.token);
            }
        }

        let windows: Vec<Surface> = records.values().map(|r| r.to_surface()).collect();
        let changed = windows.len() != self.windows.len()
            || windows.iter().zip(&self.windows).any(|(a, b)| a.id != b.id);
        self.windows = windows;

        if changed {
            let ids = self.ordered_ids();
            debug!(?ids, "window list changed");
            if let Some(cb) = self.on_windows_changed.as_mut() {
                cb(&self.windows);
            }
        }
    }

    /// Best-effort removal of a dead surface's key, skipped if the id has
    /// been re-claimed since we read it.
    fn collect_stale(&self, id: SurfaceId, token: &str) {
        match self.directory.read_one(&*self.store, id) {
            Ok(Some(current)) if current.token == token => {
                if let Err(e) = self.directory.remove(&*self.store, id) {
                    debug!(id = %id, "failed to remove stale surface: {e}");
                }
            }
            Ok(_) => {}
            Err(e) => debug!(id = %id, "failed to re-read stale surface: {e}"),
        }
    }
}
