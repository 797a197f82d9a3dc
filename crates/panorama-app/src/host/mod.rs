//! Host lifecycle glue.
//!
//! Owns one registry, one scene and a simulated window, and drives them one
//! frame at a time. Registry callbacks go out over the [`EventBus`] and are
//! applied to the scene after each registry call, so the scene is never
//! borrowed from inside a callback.
//!
//! [`EventBus`]: panorama_common::EventBus

mod core;
mod frame;
mod shutdown;
mod window;


pub use self::core::PanoramaHost;
pub use window::{Drift, SimulatedWindow};
