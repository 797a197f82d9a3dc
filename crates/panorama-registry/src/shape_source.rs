//! Where a registry gets its own window geometry from.

use std::cell::Cell;
use std::rc::Rc;

use panorama_common::Shape;

/// Live geometry of the local window, sampled once per tick.
pub trait ShapeSource {
    fn shape(&self) -> Shape;
}

impl<F: Fn() -> Shape> ShapeSource for F {
    fn shape(&self) -> Shape {
        self()
    }
}

/// Geometry pushed in by the host from its move/resize events.
///
/// Clones share one cell: hand one to the registry and keep one to update.
#[derive(Debug, Clone, Default)]
pub struct SharedShape {
    cell: Rc<Cell<Shape>>,
}

impl SharedShape {
    pub fn new(shape: Shape) -> Self {
        Self {
            cell: Rc::new(Cell::new(shape)),
        }
    }

    pub fn set(&self, shape: Shape) {
        self.cell.set(shape);
    }

    pub fn get(&self) -> Shape {
        self.cell.get()
    }
}

impl ShapeSource for SharedShape {
    fn shape(&self) -> Shape {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_shape_source() {
        let source = || Shape::new(1, 2, 3, 4);
        assert_eq!(source.shape(), Shape::new(1, 2, 3, 4));
    }

    #[test]
    fn shared_shape_clones_see_updates() {
        let host = SharedShape::new(Shape::new(0, 0, 100, 100));
        let registry_side = host.clone();
        host.set(Shape::new(50, 60, 100, 100));
        assert_eq!(registry_side.shape(), Shape::new(50, 60, 100, 100));
    }
}
