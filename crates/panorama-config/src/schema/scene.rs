//! Scene model settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Upper bound on visual planes regardless of live surfaces (valid range: 1-16).
    pub max_planes: u32,
    /// Exponential smoothing factor per tick (valid range: (0.0, 1.0]).
    pub falloff: f64,
    /// Pairwise distance under which planes count as gathered.
    pub gather_threshold: f64,
    /// Edge length of each square plane in world units.
    pub plane_size: f64,
    /// Number of material slots planes cycle through.
    pub material_count: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_planes: 4,
            falloff: 0.05,
            gather_threshold: 50.0,
            plane_size: 500.0,
            material_count: 4,
        }
    }
}
