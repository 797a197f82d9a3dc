//! Headless scene model driven by the reconciled window list.
//!
//! One flat plane per window (up to a cap) floats toward the center of its
//! window, and the whole world is offset by the negated screen position of
//! the local window so every window shows its own slice of one shared
//! space. This crate does the math only; drawing is up to the host.

pub mod model;
pub mod plane;

pub use model::SceneModel;
pub use plane::Plane;
