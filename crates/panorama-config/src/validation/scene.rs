//! Scene section validation.

use crate::schema::PanoramaConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_scene(errors: &mut Vec<String>, config: &PanoramaConfig) {
    let scene = &config.scene;
    validate_range(errors, "scene.max_planes", scene.max_planes, 1, 16);
    validate_range(errors, "scene.material_count", scene.material_count, 1, 64);
    if !(scene.falloff > 0.0 && scene.falloff <= 1.0) {
        errors.push(format!(
            "scene.falloff = {} is out of range (0, 1]",
            scene.falloff
        ));
    }
    validate_range_f64(
        errors,
        "scene.gather_threshold",
        scene.gather_threshold,
        0.0,
        f64::MAX,
    );
    if !(scene.plane_size > 0.0 && scene.plane_size.is_finite()) {
        errors.push(format!(
            "scene.plane_size = {} must be positive",
            scene.plane_size
        ));
    }
}
