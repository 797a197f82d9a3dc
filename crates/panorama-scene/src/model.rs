//! Plane layout, smoothing and world offset.

use panorama_common::Vec2;
use panorama_config::schema::SceneConfig;
use panorama_registry::Surface;
use tracing::debug;

use crate::plane::Plane;

/// Scene state for one window.
///
/// Plane positions are in shared screen coordinates. The world offset is
/// the negated screen position of the local window, so `plane.position +
/// offset` is where the plane lands inside that window.
pub struct SceneModel {
    config: SceneConfig,
    planes: Vec<Plane>,
    offset: Vec2,
    offset_target: Vec2,
}

impl SceneModel {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            planes: Vec::new(),
            offset: Vec2::ZERO,
            offset_target: Vec2::ZERO,
        }
    }

    /// Replace all planes: one per surface, in list order, up to
    /// `max_planes`. Each starts at its surface's center.
    pub fn rebuild(&mut self, surfaces: &[Surface]) {
        let cap = self.config.max_planes as usize;
        let materials = self.config.material_count.max(1) as usize;

        self.planes = surfaces
            .iter()
            .take(cap)
            .enumerate()
            .map(|(i, s)| {
                Plane::new(s.id, s.shape.center(), i % materials, self.config.plane_size)
            })
            .collect();

        debug!(
            planes = self.planes.len(),
            surfaces = surfaces.len(),
            "scene rebuilt"
        );
    }

    /// Aim the world offset at the negated screen position `(x, y)`.
    /// Without easing the offset jumps there immediately.
    pub fn set_offset_target(&mut self, x: f64, y: f64, easing: bool) {
        self.offset_target = -Vec2::new(x, y);
        if !easing {
            self.offset = self.offset_target;
        }
    }

    /// Advance one frame at shared clock time `t` (seconds).
    ///
    /// Plane `i` eases toward the center of `surfaces[i]`; planes without a
    /// matching surface hold position until the next rebuild.
    pub fn step(&mut self, surfaces: &[Surface], t: f64) {
        let falloff = self.config.falloff;
        self.offset.approach(self.offset_target, falloff);

        let spin = Plane::spin_at(t);
        for (plane, surface) in self.planes.iter_mut().zip(surfaces) {
            plane.position.approach(surface.shape.center(), falloff);
            plane.rotation = spin;
        }
        for plane in self.planes.iter_mut().skip(surfaces.len()) {
            plane.rotation = spin;
        }
    }

    /// True when no pair of planes is farther apart than `threshold`.
    /// Zero or one plane is trivially gathered.
    pub fn planes_gathered(&self, threshold: f64) -> bool {
        self.planes.iter().enumerate().all(|(i, a)| {
            self.planes[i + 1..]
                .iter()
                .all(|b| a.position.distance(b.position) <= threshold)
        })
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn offset_target(&self) -> Vec2 {
        self.offset_target
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Where `plane` appears in local window coordinates.
    pub fn local_position(&self, plane: &Plane) -> Vec2 {
        Vec2::new(
            plane.position.x + self.offset.x,
            plane.position.y + self.offset.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama_common::{Shape, SurfaceId};
    use serde_json::Value;

    fn surface(id: u32, x: i32, y: i32) -> Surface {
        Surface {
            id: SurfaceId(id),
            shape: Shape::new(x, y, 100, 100),
            metadata: Value::Null,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rebuild_places_planes_at_centers() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.rebuild(&[surface(0, 0, 0), surface(1, 200, 100)]);

        let planes = scene.planes();
        assert_eq!(planes.len(), 2);
        assert_eq!(planes[0].surface, SurfaceId(0));
        assert_eq!(planes[0].position, Vec2::new(50.0, 50.0));
        assert_eq!(planes[1].position, Vec2::new(250.0, 150.0));
        assert_eq!(planes[1].material, 1);
    }

    #[test]
    fn rebuild_caps_plane_count() {
        let mut scene = SceneModel::new(SceneConfig::default());
        let surfaces: Vec<Surface> = (0..6).map(|i| surface(i, 0, 0)).collect();
        scene.rebuild(&surfaces);
        assert_eq!(scene.planes().len(), 4);
    }

    #[test]
    fn materials_cycle() {
        let config = SceneConfig {
            max_planes: 5,
            material_count: 2,
            ..SceneConfig::default()
        };
        let mut scene = SceneModel::new(config);
        let surfaces: Vec<Surface> = (0..5).map(|i| surface(i, 0, 0)).collect();
        scene.rebuild(&surfaces);
        let materials: Vec<usize> = scene.planes().iter().map(|p| p.material).collect();
        assert_eq!(materials, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn offset_snaps_without_easing() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.set_offset_target(300.0, 40.0, false);
        assert_eq!(scene.offset(), Vec2::new(-300.0, -40.0));
    }

    #[test]
    fn offset_eases_by_falloff() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.set_offset_target(100.0, 0.0, true);
        assert_eq!(scene.offset(), Vec2::ZERO);

        scene.step(&[], 0.0);
        assert!(close(scene.offset().x, -5.0));
        scene.step(&[], 0.0);
        assert!(close(scene.offset().x, -9.75));
    }

    #[test]
    fn planes_follow_moved_surfaces() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.rebuild(&[surface(0, 0, 0)]);

        let moved = [surface(0, 100, 0)];
        scene.step(&moved, 0.0);
        assert!(close(scene.planes()[0].position.x, 55.0));

        for _ in 0..1000 {
            scene.step(&moved, 0.0);
        }
        assert!(close(scene.planes()[0].position.x, 150.0));
    }

    #[test]
    fn step_applies_clock_spin() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.rebuild(&[surface(0, 0, 0), surface(1, 0, 0)]);
        // Second surface gone but not yet rebuilt; its plane still spins.
        scene.step(&[surface(0, 0, 0)], 20.0);
        for plane in scene.planes() {
            assert!(close(plane.rotation.x, 2.0));
            assert!(close(plane.rotation.y, 18.0));
        }
    }

    #[test]
    fn gathered_checks_every_pair() {
        let mut scene = SceneModel::new(SceneConfig::default());
        assert!(scene.planes_gathered(50.0));

        scene.rebuild(&[surface(0, 0, 0), surface(1, 30, 0), surface(2, 60, 0)]);
        // 0-1 and 1-2 are 30 apart, but 0-2 is 60.
        assert!(!scene.planes_gathered(50.0));
        assert!(scene.planes_gathered(61.0));
        // Exactly at the threshold still counts.
        assert!(scene.planes_gathered(60.0));
    }

    #[test]
    fn local_position_applies_offset() {
        let mut scene = SceneModel::new(SceneConfig::default());
        scene.rebuild(&[surface(0, 500, 0)]);
        scene.set_offset_target(500.0, 0.0, false);
        let plane = scene.planes()[0].clone();
        assert_eq!(scene.local_position(&plane), Vec2::new(50.0, 50.0));
    }
}
