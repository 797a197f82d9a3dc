//! Heartbeat tracking.
//!
//! Owners bump `beat` every tick. An observer cannot compare clocks with the
//! owner, so it records the *local* tick at which it last saw each beat
//! change and calls a surface stale once that is `stale_after` ticks old.
//! Ticks in which the directory could not be read are not counted: a peer
//! cannot prove liveness through a store that is down.

use std::collections::{BTreeMap, HashMap};

use panorama_common::SurfaceId;

use crate::record::SurfaceRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Heartbeat {
    token: String,
    beat: u64,
    changed_at: u64,
}

#[derive(Debug, Default)]
pub struct Liveness {
    seen: HashMap<SurfaceId, Heartbeat>,
    /// Tick of the most recent successful observation.
    last_observed: Option<u64>,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one directory read taken at local tick `tick` into the tracker.
    ///
    /// A new id, or a known id carrying a new claim token, starts fresh.
    /// Ids absent from `records` are forgotten. A stale id that stays in
    /// the directory keeps its old timestamp and stays stale. Ticks skipped
    /// since the previous observation shift every timestamp forward.
    pub fn observe(&mut self, tick: u64, records: &BTreeMap<SurfaceId, SurfaceRecord>) {
        if let Some(last) = self.last_observed {
            let missed = tick.saturating_sub(last).saturating_sub(1);
            if missed > 0 {
                for hb in self.seen.values_mut() {
                    hb.changed_at += missed;
                }
            }
        }
        self.last_observed = Some(tick);

        self.seen.retain(|id, _| records.contains_key(id));
        for (id, record) in records {
            match self.seen.get_mut(id) {
                Some(hb) if hb.token == record.token => {
                    if hb.beat != record.beat {
                        hb.beat = record.beat;
                        hb.changed_at = tick;
                    }
                }
                _ => {
                    self.seen.insert(
                        *id,
                        Heartbeat {
                            token: record.token.clone(),
                            beat: record.beat,
                            changed_at: tick,
                        },
                    );
                }
            }
        }
    }

    pub fn is_stale(&self, id: SurfaceId, tick: u64, stale_after: u64) -> bool {
        self.seen
            .get(&id)
            .is_some_and(|hb| tick.saturating_sub(hb.changed_at) >= stale_after)
    }

    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}
