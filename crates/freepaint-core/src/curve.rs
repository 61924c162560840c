//! Curve synthesis: turns raw pointer samples into a smooth, simplified spline.

use crate::geometry::{angle_between, perpendicular_distance};
use crate::point::PathPoint;
use kurbo::Vec2;
use std::f64::consts::FRAC_PI_2;

/// Turn angle (radians) at or above which a vertex becomes a sharp corner.
///
/// Empirical; tune here rather than in [`synthesize_handles`].
pub const CORNER_ANGLE_THRESHOLD: f64 = FRAC_PI_2;

/// Ramer-Douglas-Peucker line simplification.
///
/// The end points always survive. Within a span, the sample farthest from
/// the span's chord splits it in two when its distance exceeds `epsilon`;
/// otherwise every sample strictly inside the span is dropped. With an
/// `epsilon` of 0 only samples lying exactly on their chord disappear.
pub fn simplify(points: &[PathPoint], epsilon: f64) -> Vec<PathPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((start, end)) = spans.pop() {
        let (a, b) = (points[start].position, points[end].position);
        let mut split = start;
        let mut distance = epsilon;
        for i in start + 1..end {
            let d = perpendicular_distance(points[i].position, a, b);
            if d > distance {
                split = i;
                distance = d;
            }
        }
        if split != start {
            keep[split] = true;
            spans.push((start, split));
            spans.push((split, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

/// Derive control handles for every point (Catmull-Rom style cardinal spline).
///
/// Interior points get a tangent of `(next - prev) / 6` as the outgoing handle
/// and its mirror as the incoming one. The first point only gets an outgoing
/// handle toward its neighbour; a closed path's last point gets the symmetric
/// incoming one. Vertices turning by [`CORNER_ANGLE_THRESHOLD`] or more get
/// zero handles, i.e. a sharp corner.
pub fn synthesize_handles(points: &mut [PathPoint], closed: bool) {
    let n = points.len();
    for point in points.iter_mut() {
        point.clear_handles();
    }
    if n < 2 {
        return;
    }

    points[0].right_handle = Some((points[1].position - points[0].position) / 3.0);

    for i in 1..n - 1 {
        let prev = points[i - 1].position;
        let next = points[i + 1].position;
        let point = &mut points[i];

        let angle = angle_between(prev - point.position, point.position - next);
        if angle.abs() >= CORNER_ANGLE_THRESHOLD {
            point.left_handle = Some(Vec2::ZERO);
            point.right_handle = Some(Vec2::ZERO);
        } else {
            let tangent = (next - prev) / 6.0;
            point.right_handle = Some(tangent);
            point.left_handle = Some(-tangent);
        }
    }

    if closed {
        points[n - 1].left_handle = Some((points[n - 2].position - points[n - 1].position) / 3.0);
    }
}
