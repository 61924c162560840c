//! Small geometric helpers shared by curve synthesis, the erase engine and the tools.
//!
//! Vector arithmetic (add, subtract, scale, length) comes straight from
//! `kurbo::Vec2`; this module only adds what kurbo doesn't have.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Vec2};

/// Tolerance used when converting analytic shapes (circles) to Bézier paths.
const SHAPE_TOLERANCE: f64 = 0.01;

/// Angle between two vectors in radians, in `[0, π]`.
///
/// The cosine is clamped to `[-1, 1]` so rounding can't produce NaN.
/// A zero-length operand has no direction; it is treated as "no turn" (0.0).
pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
    let len = a.hypot() * b.hypot();
    if len < f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / len).clamp(-1.0, 1.0).acos()
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// Falls back to the distance from `a` when `a` and `b` coincide.
pub fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let chord = b - a;
    let length = chord.hypot();
    if length < f64::EPSILON {
        return (point - a).hypot();
    }
    chord.cross(point - a).abs() / length
}

/// A closed diamond centered on `center`, `size` units from center to each tip.
///
/// Used for point markers and as the dot shape of the spray tool.
pub fn diamond(center: Point, size: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(center.x, center.y - size));
    path.line_to(Point::new(center.x + size, center.y));
    path.line_to(Point::new(center.x, center.y + size));
    path.line_to(Point::new(center.x - size, center.y));
    path.close_path();
    path
}

/// The four tips of [`diamond`] in drawing order.
pub fn diamond_points(center: Point, size: f64) -> [Point; 4] {
    [
        Point::new(center.x, center.y - size),
        Point::new(center.x + size, center.y),
        Point::new(center.x, center.y + size),
        Point::new(center.x - size, center.y),
    ]
}

/// A closed circle as a Bézier path.
pub fn circle(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(SHAPE_TOLERANCE)
}

/// Whether two rectangles overlap, edges included.
///
/// Unlike an area test this also accepts degenerate (zero width or height)
/// rectangles, which is what a perfectly horizontal stroke has as bounds.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_between() {
        let right = Vec2::new(1.0, 0.0);
        assert!(angle_between(right, right).abs() < 1e-12);
        assert!((angle_between(right, Vec2::new(0.0, 3.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((angle_between(right, Vec2::new(-2.0, 0.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_never_nan() {
        // Nearly parallel vectors whose normalized dot product rounds above 1.
        let a = Vec2::new(0.1 + 0.2, 0.3);
        let b = Vec2::new(0.3, 0.1 + 0.2);
        assert!(!angle_between(a, b).is_nan());
        assert_eq!(angle_between(Vec2::ZERO, a), 0.0);
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = perpendicular_distance(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-12);

        // Either side of the line, and beyond the segment ends.
        let d = perpendicular_distance(Point::new(25.0, -4.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((d - 4.0).abs() < 1e-12);

        let d = perpendicular_distance(Point::new(3.0, 4.0), Point::ZERO, Point::ZERO);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_diamond_bounds() {
        let bounds = diamond(Point::new(10.0, 10.0), 2.0).bounding_box();
        assert_eq!(bounds, Rect::new(8.0, 8.0, 12.0, 12.0));
    }

    #[test]
    fn test_rects_overlap_degenerate() {
        let line = Rect::new(0.0, 5.0, 10.0, 5.0);
        let area = Rect::new(2.0, 0.0, 4.0, 10.0);
        assert!(rects_overlap(line, area));
        assert!(!rects_overlap(line, Rect::new(20.0, 0.0, 30.0, 10.0)));
    }
}
