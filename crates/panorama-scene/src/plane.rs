use panorama_common::{SurfaceId, Vec2};

/// Spin rates in radians per second of shared clock time.
pub const SPIN_RATE_X: f64 = 0.1;
pub const SPIN_RATE_Y: f64 = 0.9;

/// A flat textured square standing in for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Window this plane follows.
    pub surface: SurfaceId,
    /// Center in world coordinates.
    pub position: Vec2,
    /// Rotation about the x and y axes, in radians.
    pub rotation: Vec2,
    /// Index into the host's material table.
    pub material: usize,
    pub size: f64,
}

impl Plane {
    pub fn new(surface: SurfaceId, position: Vec2, material: usize, size: f64) -> Self {
        Self {
            surface,
            position,
            rotation: Vec2::ZERO,
            material,
            size,
        }
    }

    /// Rotation at shared time `t`. Windows sharing a clock spin in step.
    pub fn spin_at(t: f64) -> Vec2 {
        Vec2::new(t * SPIN_RATE_X, t * SPIN_RATE_Y)
    }
}
