//! Configuration schema types for Panorama.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod host;
mod registry;
mod scene;
mod store;
mod system;

pub use host::*;
pub use registry::*;
pub use scene::*;
pub use store::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanoramaConfig {
    pub registry: RegistryConfig,
    pub scene: SceneConfig,
    pub store: StoreConfig,
    pub host: HostConfig,
    pub logging: LoggingConfig,
}
