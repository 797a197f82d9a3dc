//! Shared store settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory shared by every participant. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_directory_from_toml() {
        let config: StoreConfig = toml::from_str("directory = \"/tmp/panorama\"").unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/tmp/panorama")));
    }
}
