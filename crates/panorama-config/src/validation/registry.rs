//! Registry section validation.

use crate::schema::PanoramaConfig;

use super::helpers::validate_range;

pub(crate) fn validate_registry(errors: &mut Vec<String>, config: &PanoramaConfig) {
    validate_range(
        errors,
        "registry.stale_after_ticks",
        config.registry.stale_after_ticks,
        2,
        3600,
    );
    if config.registry.key_prefix.is_empty() {
        errors.push("registry.key_prefix must not be empty".into());
    }
}
