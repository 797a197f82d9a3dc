//! Core types and constructors for SurfaceRegistry.

use panorama_common::{Shape, SurfaceId};
use panorama_config::schema::RegistryConfig;
use panorama_store::SharedStore;

use crate::directory::Directory;
use crate::liveness::Liveness;
use crate::record::{Surface, SurfaceRecord};
use crate::shape_source::ShapeSource;

pub type WindowsChangedCallback = Box<dyn FnMut(&[Surface])>;
pub type ShapeChangedCallback = Box<dyn FnMut(&Shape)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Uninitialized,
    Active,
    /// Shut down cleanly; `init` may start a fresh claim.
    Closed,
}

/// One participant's view of the shared surface directory.
pub struct SurfaceRegistry {
    pub(super) store: Box<dyn SharedStore>,
    pub(super) directory: Directory,
    pub(super) shape_source: Box<dyn ShapeSource>,
    /// Ticks without a heartbeat before another surface is dropped.
    pub(super) stale_after: u64,
    pub(super) state: RegistryState,
    /// Our own record, as last published. `None` until `init`.
    pub(super) own: Option<SurfaceRecord>,
    /// Local tick counter; only meaningful to this participant.
    pub(super) tick: u64,
    pub(super) liveness: Liveness,
    /// Reconciled list, ascending by id.
    pub(super) windows: Vec<Surface>,
    pub(super) on_windows_changed: Option<WindowsChangedCallback>,
    pub(super) on_shape_changed: Option<ShapeChangedCallback>,
}

impl SurfaceRegistry {
    pub fn new(
        store: impl SharedStore + 'static,
        shape_source: impl ShapeSource + 'static,
        config: &RegistryConfig,
    ) -> Self {
        Self {
            store: Box::new(store),
            directory: Directory::new(config.key_prefix.clone()),
            shape_source: Box::new(shape_source),
            stale_after: u64::from(config.stale_after_ticks),
            state: RegistryState::Uninitialized,
            own: None,
            tick: 0,
            liveness: Liveness::new(),
            windows: Vec::new(),
            on_windows_changed: None,
            on_shape_changed: None,
        }
    }

    // -- Callbacks --

    /// Called with the new list whenever the ordered set of ids changes.
    pub fn set_windows_changed_callback(&mut self, cb: impl FnMut(&[Surface]) + 'static) {
        self.on_windows_changed = Some(Box::new(cb));
    }

    /// Called when this window's own geometry changes.
    pub fn set_shape_changed_callback(&mut self, cb: impl FnMut(&Shape) + 'static) {
        self.on_shape_changed = Some(Box::new(cb));
    }

    // -- Accessors --

    /// Most recently reconciled list, ascending by id. Empty before `init`.
    pub fn windows(&self) -> &[Surface] {
        &self.windows
    }

    pub fn this_id(&self) -> Option<SurfaceId> {
        self.own.as_ref().map(|r| r.id)
    }

    pub fn this_surface(&self) -> Option<Surface> {
        self.own.as_ref().map(SurfaceRecord::to_surface)
    }

    /// Index of this window in the reconciled list.
    pub fn this_index(&self) -> Option<usize> {
        let id = self.this_id()?;
        self.windows.iter().position(|s| s.id == id)
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub(super) fn ordered_ids(&self) -> Vec<SurfaceId> {
        self.windows.iter().map(|s| s.id).collect()
    }
}
