//! Surface registry: the cross-window coordination core.
//!
//! Every participant (window) owns one record in a shared store and
//! refreshes it once per tick. Each tick the participant re-reads the whole
//! directory, drops records whose heartbeat stopped advancing, and derives
//! the same ascending-id ordering as everyone else. No participant trusts
//! notification payloads; the next tick's read always corrects a missed or
//! reordered notification.

pub mod directory;
pub mod liveness;
pub mod record;
pub mod registry;
pub mod shape_source;

pub use directory::Directory;
pub use record::{Surface, SurfaceRecord};
pub use registry::{RegistryState, SurfaceRegistry};
pub use shape_source::{SharedShape, ShapeSource};
