//! Boolean difference of two boundaries.
//!
//! Both operands are flattened to line polygons with kurbo and filled with the
//! nonzero rule. Every edge is split at every crossing with every other edge;
//! a sub-edge survives when the result region lies on exactly one side of it,
//! and is oriented so the region is on its left. The surviving edges are then
//! chained into closed rings. Curves in the result are therefore always line
//! segments.

use crate::geometry::rects_overlap;
use kurbo::{BezPath, Line, ParamCurveNearest, PathEl, Point, Rect, Shape, Vec2};
use std::collections::{HashMap, HashSet};

/// Maximum distance between a curve and its flattened polygon.
pub const FLATTEN_TOLERANCE: f64 = 0.05;

/// Distance from an edge midpoint to the side samples used for classification.
const SIDE_OFFSET: f64 = 1e-6;

/// Parameter slack when deciding whether a crossing lies on a segment.
const PARAM_EPSILON: f64 = 1e-9;

/// Sub-edges shorter than this are dropped.
const MIN_EDGE_LENGTH: f64 = 1e-9;

/// Endpoints closer than this are the same ring vertex.
const JOIN_DISTANCE: f64 = 1e-7;

/// A closed polygon; the closing edge from last to first point is implicit.
pub type Polygon = Vec<Point>;

/// Outcome of [`difference`].
#[derive(Debug, Clone)]
pub enum Difference {
    /// The clip does not touch the subject; the subject is unchanged.
    Unchanged,
    /// Nothing of the subject remains.
    Empty,
    /// The remaining region, as closed line rings.
    Region(BezPath),
}

impl Difference {
    /// Whether nothing of the subject remains.
    pub fn is_empty(&self) -> bool {
        matches!(self, Difference::Empty)
    }
}

/// A boundary flattened once, for repeated queries.
#[derive(Debug, Clone)]
pub struct Region {
    polygons: Vec<Polygon>,
    /// The polygons as a line-only path, for winding queries.
    outline: BezPath,
    bounds: Rect,
}

impl Region {
    pub fn new(boundary: &BezPath) -> Self {
        Self::from_polygons(flatten(boundary, FLATTEN_TOLERANCE))
    }

    fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut outline = BezPath::new();
        for polygon in &polygons {
            outline.move_to(polygon[0]);
            for &p in &polygon[1..] {
                outline.line_to(p);
            }
            outline.close_path();
        }
        let bounds = if polygons.is_empty() {
            Rect::ZERO
        } else {
            outline.bounding_box()
        };
        Self { polygons, outline, bounds }
    }

    /// Whether the region encloses no area at all.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Nonzero winding number of `p`.
    pub fn winding(&self, p: Point) -> i32 {
        if self.is_empty() || !rects_overlap(self.bounds, Rect::from_points(p, p)) {
            return 0;
        }
        self.outline.winding(p)
    }

    /// Whether the closed disc around `center` lies inside the region.
    ///
    /// Equivalent to the disc minus the region being empty: the center must
    /// be inside and no edge may come closer than `radius`. A disc that only
    /// touches the boundary from inside still counts as covered.
    pub fn covers_disc(&self, center: Point, radius: f64) -> bool {
        let b = self.bounds;
        if self.is_empty()
            || center.x - radius < b.x0
            || center.x + radius > b.x1
            || center.y - radius < b.y0
            || center.y + radius > b.y1
        {
            return false;
        }
        if self.outline.winding(center) == 0 {
            return false;
        }
        let limit = radius * radius;
        self.edges().all(|edge| edge.nearest(center, 0.0).distance_sq >= limit)
    }

    fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        self.polygons.iter().flat_map(|polygon| {
            let n = polygon.len();
            (0..n).map(move |i| Line::new(polygon[i], polygon[(i + 1) % n]))
        })
    }

    /// Compute `self - clip`.
    pub fn difference(&self, clip: &Region) -> Difference {
        if self.is_empty() {
            return Difference::Empty;
        }
        if clip.is_empty() || !rects_overlap(self.bounds, clip.bounds) {
            return Difference::Unchanged;
        }

        let edges = collect_edges(&self.polygons, true)
            .into_iter()
            .chain(collect_edges(&clip.polygons, false))
            .collect::<Vec<_>>();
        let pieces = split_edges(&edges);

        let inside = |p: Point| self.winding(p) != 0 && clip.winding(p) == 0;

        let mut kept: Vec<(Point, Point)> = Vec::new();
        let mut seen = HashSet::new();
        let mut subject_dropped = false;
        let mut clip_used = false;

        for piece in &pieces {
            let d = piece.b - piece.a;
            let len = d.hypot();
            let normal = Vec2::new(-d.y, d.x) / len;
            let mid = piece.a.midpoint(piece.b);
            let offset = SIDE_OFFSET.min(len * 0.25);

            let in_left = inside(mid + normal * offset);
            let in_right = inside(mid - normal * offset);
            if in_left == in_right {
                subject_dropped |= piece.subject;
                continue;
            }
            clip_used |= !piece.subject;

            // Overlapping collinear edges split into pieces with identical
            // endpoints, so exact keys catch the duplicates.
            let edge = if in_left { (piece.a, piece.b) } else { (piece.b, piece.a) };
            if seen.insert((point_key(edge.0), point_key(edge.1))) {
                kept.push(edge);
            }
        }

        if !subject_dropped && !clip_used {
            return Difference::Unchanged;
        }

        let rings = chain_rings(&kept);
        if rings.is_empty() {
            return Difference::Empty;
        }
        Difference::Region(Region::from_polygons(rings).outline)
    }
}

/// Compute `subject - clip`.
pub fn difference(subject: &BezPath, clip: &BezPath) -> Difference {
    Region::new(subject).difference(&Region::new(clip))
}

/// Flatten a path into closed polygons, one per subpath.
///
/// Subpaths with fewer than three distinct points have no area and are skipped.
pub fn flatten(path: &BezPath, tolerance: f64) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    let mut current: Polygon = Vec::new();
    let mut start = Point::ZERO;

    kurbo::flatten(path, tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            finish_polygon(&mut polygons, &mut current);
            current.push(p);
            start = p;
        }
        PathEl::LineTo(p) => {
            if current.is_empty() {
                // Drawing after a close continues from the subpath start.
                current.push(start);
            }
            if current.last().is_none_or(|last| last.distance(p) > MIN_EDGE_LENGTH) {
                current.push(p);
            }
        }
        PathEl::ClosePath => finish_polygon(&mut polygons, &mut current),
        // Flattening only emits moves, lines and closes.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    finish_polygon(&mut polygons, &mut current);
    polygons
}

fn finish_polygon(polygons: &mut Vec<Polygon>, current: &mut Polygon) {
    let mut polygon = std::mem::take(current);
    while polygon.len() > 1 && polygon[0].distance(polygon[polygon.len() - 1]) <= MIN_EDGE_LENGTH {
        polygon.pop();
    }
    if polygon.len() >= 3 {
        polygons.push(polygon);
    }
}

fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

fn point_key(p: Point) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Point,
    b: Point,
    subject: bool,
}

fn collect_edges(polygons: &[Polygon], subject: bool) -> Vec<Edge> {
    let mut edges = Vec::new();
    for polygon in polygons {
        let n = polygon.len();
        for i in 0..n {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            if a.distance(b) > MIN_EDGE_LENGTH {
                edges.push(Edge { a, b, subject });
            }
        }
    }
    edges
}

/// Split every edge at its crossings with every other edge.
///
/// Candidate pairs come from a sweep over x; a crossing point is computed
/// once and shared by both edges so the pieces meet exactly.
fn split_edges(edges: &[Edge]) -> Vec<Edge> {
    let bounds: Vec<Rect> = edges.iter().map(|e| Rect::from_points(e.a, e.b)).collect();
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&i, &j| bounds[i].x0.total_cmp(&bounds[j].x0));

    let mut cuts: Vec<Vec<(f64, Point)>> = vec![Vec::new(); edges.len()];
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if bounds[j].x0 > bounds[i].x1 + JOIN_DISTANCE {
                break;
            }
            if bounds[j].y0 > bounds[i].y1 + JOIN_DISTANCE || bounds[j].y1 < bounds[i].y0 - JOIN_DISTANCE {
                continue;
            }
            cut_pair(edges, &mut cuts, i, j);
        }
    }

    let mut pieces = Vec::with_capacity(edges.len());
    for (edge, mut edge_cuts) in edges.iter().zip(cuts) {
        edge_cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut from = edge.a;
        for (_, p) in edge_cuts.into_iter().chain(std::iter::once((1.0, edge.b))) {
            if from.distance(p) > MIN_EDGE_LENGTH {
                pieces.push(Edge { a: from, b: p, subject: edge.subject });
                from = p;
            }
        }
    }
    pieces
}

/// Record where edges `i` and `j` cut each other.
fn cut_pair(edges: &[Edge], cuts: &mut [Vec<(f64, Point)>], i: usize, j: usize) {
    let (ei, ej) = (edges[i], edges[j]);
    let r = ei.b - ei.a;
    let s = ej.b - ej.a;
    let qp = ej.a - ei.a;
    let denom = cross(r, s);

    if denom.abs() > PARAM_EPSILON * r.hypot() * s.hypot() {
        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        let range = -PARAM_EPSILON..=1.0 + PARAM_EPSILON;
        if !range.contains(&t) || !range.contains(&u) {
            return;
        }
        let point = if t <= PARAM_EPSILON {
            ei.a
        } else if t >= 1.0 - PARAM_EPSILON {
            ei.b
        } else if u <= PARAM_EPSILON {
            ej.a
        } else if u >= 1.0 - PARAM_EPSILON {
            ej.b
        } else {
            ei.a + r * t
        };
        if is_interior(t) {
            cuts[i].push((t, point));
        }
        if is_interior(u) {
            cuts[j].push((u, point));
        }
    } else if cross(qp, r).abs() <= PARAM_EPSILON * r.hypot() * (qp.hypot() + 1.0) {
        // Collinear: each segment is cut where the other one ends.
        for p in [ej.a, ej.b] {
            let t = (p - ei.a).dot(r) / r.hypot2();
            if is_interior(t) {
                cuts[i].push((t, p));
            }
        }
        for p in [ei.a, ei.b] {
            let u = (p - ej.a).dot(s) / s.hypot2();
            if is_interior(u) {
                cuts[j].push((u, p));
            }
        }
    }
}

fn is_interior(t: f64) -> bool {
    t > PARAM_EPSILON && t < 1.0 - PARAM_EPSILON
}

/// Chain directed edges into closed rings.
fn chain_rings(edges: &[(Point, Point)]) -> Vec<Polygon> {
    let mut starts: HashMap<(u64, u64), Vec<usize>> = HashMap::new();
    for (k, edge) in edges.iter().enumerate() {
        starts.entry(point_key(edge.0)).or_default().push(k);
    }

    let mut used = vec![false; edges.len()];
    let next_from = |used: &[bool], end: Point| {
        starts
            .get(&point_key(end))
            .and_then(|candidates| candidates.iter().copied().find(|&k| !used[k]))
            .or_else(|| (0..edges.len()).find(|&k| !used[k] && edges[k].0.distance(end) < JOIN_DISTANCE))
    };

    let mut rings = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let origin = edges[start].0;
        let mut ring = vec![origin];
        let mut end = edges[start].1;

        while end.distance(origin) >= JOIN_DISTANCE {
            ring.push(end);
            match next_from(&used, end) {
                Some(k) => {
                    used[k] = true;
                    end = edges[k].1;
                }
                None => {
                    log::debug!("Unclosed ring with {} vertices; closing it", ring.len());
                    break;
                }
            }
        }

        let ring = drop_collinear(ring);
        if ring.len() >= 3 {
            rings.push(ring);
        }
    }
    rings
}

/// Remove vertices lying on the straight line between their neighbours.
fn drop_collinear(mut ring: Polygon) -> Polygon {
    let mut i = 0;
    while ring.len() >= 3 && i < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        let (u, v) = (ring[i] - prev, next - ring[i]);
        if cross(u, v).abs() <= PARAM_EPSILON * u.hypot() * v.hypot() && u.dot(v) > 0.0 {
            ring.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::circle;

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y1));
        path.line_to((x0, y1));
        path.close_path();
        path
    }

    /// Signed area with every ring's region on its left, i.e. the region area.
    fn region_area(path: &BezPath) -> f64 {
        flatten(path, FLATTEN_TOLERANCE)
            .iter()
            .map(|ring| {
                let n = ring.len();
                (0..n)
                    .map(|i| cross(ring[i].to_vec2(), ring[(i + 1) % n].to_vec2()))
                    .sum::<f64>()
                    / 2.0
            })
            .sum()
    }

    #[test]
    fn test_winding() {
        let region = Region::new(&rect_path(0.0, 0.0, 10.0, 10.0));
        assert_eq!(region.polygons().len(), 1);
        assert_ne!(region.winding(Point::new(5.0, 5.0)), 0);
        assert_eq!(region.winding(Point::new(15.0, 5.0)), 0);
        assert_eq!(region.winding(Point::new(5.0, -1.0)), 0);
    }

    #[test]
    fn test_flatten_circle() {
        let polygons = flatten(&circle(Point::new(0.0, 0.0), 10.0), FLATTEN_TOLERANCE);
        assert_eq!(polygons.len(), 1);
        assert!(polygons[0].len() > 16);
        for p in &polygons[0] {
            assert!((p.to_vec2().hypot() - 10.0).abs() < 0.1);
        }
    }

    #[test]
    fn test_covers_disc() {
        let region = Region::new(&rect_path(0.0, 0.0, 10.0, 10.0));
        assert!(region.covers_disc(Point::new(5.0, 5.0), 1.0));
        assert!(region.covers_disc(Point::new(1.0, 5.0), 1.0));
        assert!(!region.covers_disc(Point::new(0.5, 5.0), 1.0));
        assert!(!region.covers_disc(Point::new(20.0, 5.0), 1.0));
        assert!(!Region::new(&BezPath::new()).covers_disc(Point::ZERO, 1.0));
    }

    #[test]
    fn test_disjoint_is_unchanged() {
        let subject = rect_path(0.0, 0.0, 10.0, 10.0);
        let clip = rect_path(20.0, 20.0, 30.0, 30.0);
        assert!(matches!(difference(&subject, &clip), Difference::Unchanged));

        // Overlapping bounds but no overlap of the regions themselves.
        let clip = circle(Point::new(14.0, 14.0), 5.0);
        assert!(matches!(difference(&subject, &clip), Difference::Unchanged));
    }

    #[test]
    fn test_fully_covered_is_empty() {
        let subject = rect_path(2.0, 2.0, 4.0, 4.0);
        let clip = rect_path(0.0, 0.0, 10.0, 10.0);
        assert!(difference(&subject, &clip).is_empty());
    }

    #[test]
    fn test_overlap_area() {
        let subject = rect_path(0.0, 0.0, 10.0, 10.0);
        let clip = rect_path(5.0, -5.0, 15.0, 5.0);
        let Difference::Region(result) = difference(&subject, &clip) else {
            panic!("expected a region");
        };
        assert!((region_area(&result) - 75.0).abs() < 1e-6);
        let polygons = flatten(&result, FLATTEN_TOLERANCE);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].len(), 6);
    }

    #[test]
    fn test_inner_clip_makes_hole() {
        let subject = rect_path(0.0, 0.0, 10.0, 10.0);
        let clip = rect_path(3.0, 3.0, 7.0, 7.0);
        let Difference::Region(result) = difference(&subject, &clip) else {
            panic!("expected a region");
        };
        let region = Region::new(&result);
        assert_eq!(region.polygons().len(), 2);
        assert!((region_area(&result) - 84.0).abs() < 1e-6);
        assert_eq!(region.winding(Point::new(5.0, 5.0)), 0);
        assert_ne!(region.winding(Point::new(1.0, 1.0)), 0);
    }

    #[test]
    fn test_shared_edge() {
        // Clip shares the right edge of the subject.
        let subject = rect_path(0.0, 0.0, 10.0, 10.0);
        let clip = rect_path(5.0, 0.0, 10.0, 10.0);
        let Difference::Region(result) = difference(&subject, &clip) else {
            panic!("expected a region");
        };
        assert!((region_area(&result) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_dense_band_cut_in_two() {
        let mut band = BezPath::new();
        band.move_to((0.0, 0.0));
        for i in 1..=400 {
            let x = i as f64 * 0.5;
            band.line_to((x, (x * 0.3).sin() * 3.0));
        }
        band.line_to((200.0, 20.0));
        band.line_to((0.0, 20.0));
        band.close_path();
        let clip = circle(Point::new(100.0, 5.0), 30.0);

        let Difference::Region(result) = difference(&band, &clip) else {
            panic!("expected a region");
        };
        assert_eq!(Region::new(&result).polygons().len(), 2);
    }
}
