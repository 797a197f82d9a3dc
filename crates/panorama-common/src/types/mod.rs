mod core;

pub use self::core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_center() {
        let shape = Shape::new(100, 200, 800, 600);
        let center = shape.center();
        assert!((center.x - 500.0).abs() < f64::EPSILON);
        assert!((center.y - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shape_origin() {
        let shape = Shape::new(-1280, 40, 1280, 1024);
        assert_eq!(shape.origin(), Vec2::new(-1280.0, 40.0));
    }

    #[test]
    fn shape_serialization_uses_short_field_names() {
        let shape = Shape::new(1, 2, 3, 4);
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"w":3,"h":4}"#);
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, back);
    }

    #[test]
    fn surface_id_display() {
        assert_eq!(SurfaceId(7).to_string(), "surface-7");
    }

    #[test]
    fn surface_id_orders_numerically() {
        let mut ids = vec![SurfaceId(10), SurfaceId(2), SurfaceId(0)];
        ids.sort();
        assert_eq!(ids, vec![SurfaceId(0), SurfaceId(2), SurfaceId(10)]);
    }

    #[test]
    fn surface_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&SurfaceId(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vec2_approach_moves_fraction_of_gap() {
        let mut v = Vec2::new(0.0, 100.0);
        v.approach(Vec2::new(100.0, 0.0), 0.25);
        assert!((v.x - 25.0).abs() < 1e-9);
        assert!((v.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn vec2_neg() {
        assert_eq!(-Vec2::new(3.0, -4.0), Vec2::new(-3.0, 4.0));
    }
}
