//! Host loop settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Registry ticks per second (valid range: 1-240).
    pub tick_rate_hz: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { tick_rate_hz: 60 }
    }
}
