use std::str::FromStr;

use panorama_common::Shape;
use panorama_registry::SharedShape;

/// Per-frame window movement, parsed from `DX,DY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drift {
    pub dx: i32,
    pub dy: i32,
}

impl FromStr for Drift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dx, dy) = s
            .split_once(',')
            .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i32>()
                .map_err(|e| format!("invalid drift component '{v}': {e}"))
        };
        Ok(Self {
            dx: parse(dx)?,
            dy: parse(dy)?,
        })
    }
}

/// A window that only exists as geometry, optionally drifting each frame.
pub struct SimulatedWindow {
    shape: SharedShape,
    drift: Drift,
}

impl SimulatedWindow {
    pub fn new(shape: Shape, drift: Drift) -> Self {
        Self {
            shape: SharedShape::new(shape),
            drift,
        }
    }

    /// Handle the registry samples each tick.
    pub fn shape_handle(&self) -> SharedShape {
        self.shape.clone()
    }

    pub fn shape(&self) -> Shape {
        self.shape.get()
    }

    pub fn move_to(&self, x: i32, y: i32) {
        let shape = self.shape.get();
        self.shape.set(Shape { x, y, ..shape });
    }

    /// Apply one frame of drift.
    pub fn advance(&self) {
        if self.drift == Drift::default() {
            return;
        }
        let shape = self.shape.get();
        self.move_to(
            shape.x.saturating_add(self.drift.dx),
            shape.y.saturating_add(self.drift.dy),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_parses_signed_pairs() {
        assert_eq!("-3,1".parse::<Drift>(), Ok(Drift { dx: -3, dy: 1 }));
        assert_eq!(" 4 , -2 ".parse::<Drift>(), Ok(Drift { dx: 4, dy: -2 }));
        assert!("3".parse::<Drift>().is_err());
        assert!("a,1".parse::<Drift>().is_err());
    }

    #[test]
    fn advance_applies_drift() {
        let window = SimulatedWindow::new(Shape::new(0, 0, 10, 10), Drift { dx: 2, dy: -1 });
        window.advance();
        window.advance();
        assert_eq!(window.shape(), Shape::new(4, -2, 10, 10));
    }
}
