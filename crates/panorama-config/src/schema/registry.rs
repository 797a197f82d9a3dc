//! Surface registry settings.

use serde::{Deserialize, Serialize};

/// Heartbeat and key layout for the surface directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Ticks without a heartbeat before a surface is pruned (valid range: 2-3600).
    pub stale_after_ticks: u32,
    /// Store key prefix for surface records. Every participant must agree on it.
    pub key_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            stale_after_ticks: 60,
            key_prefix: "panorama/surface/".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.stale_after_ticks, 60);
        assert_eq!(config.key_prefix, "panorama/surface/");
    }

    #[test]
    fn registry_config_partial_toml() {
        let config: RegistryConfig = toml::from_str("key_prefix = \"demo/\"").unwrap();
        assert_eq!(config.key_prefix, "demo/");
        assert_eq!(config.stale_after_ticks, 60);
    }
}
