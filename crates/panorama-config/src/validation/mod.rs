//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod registry;
mod scene;


use crate::schema::PanoramaConfig;
use panorama_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PanoramaConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    registry::validate_registry(&mut errors, config);
    scene::validate_scene(&mut errors, config);
    validate_range(
        &mut errors,
        "host.tick_rate_hz",
        config.host.tick_rate_hz,
        1,
        240,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
