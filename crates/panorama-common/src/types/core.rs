use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// Screen-space geometry of a surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Shape {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            f64::from(self.x) + f64::from(self.w) * 0.5,
            f64::from(self.y) + f64::from(self.h) * 0.5,
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Move `factor` of the remaining way toward `target`.
    pub fn approach(&mut self, target: Vec2, factor: f64) {
        self.x += (target.x - self.x) * factor;
        self.y += (target.y - self.y) * factor;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}
