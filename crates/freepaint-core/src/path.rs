//! The path model: an ordered point list plus appearance and a cached boundary.

use crate::appearance::Appearance;
use crate::curve;
use crate::point::{Command, PathPoint};
use kurbo::{BezPath, Point, Rect, Shape, Vec2};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Unique identifier for paths.
pub type PathId = Uuid;

/// A freehand or shape path in the document.
///
/// `boundary` is a cache of the geometry implied by `points`; every mutation of
/// the point list goes through a method that drops it, so a present cache is
/// always current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawPath {
    pub(crate) id: PathId,
    points: Vec<PathPoint>,
    /// Whether a segment is drawn from the end of each subpath back to its start.
    pub closed: bool,
    pub appearance: Appearance,
    /// Epsilon for RDP simplification in [`finalize`](Self::finalize); 0 disables it.
    pub simplification_epsilon: f64,
    /// Draw point and handle markers on top of the path (tool overlays only).
    #[serde(skip)]
    pub show_points: bool,
    /// Raw samples were added since the last finalize.
    #[serde(skip)]
    pending: bool,
    #[serde(skip)]
    boundary: Option<BezPath>,
}

impl Default for DrawPath {
    fn default() -> Self {
        Self::new(Appearance::default())
    }
}

impl PartialEq for DrawPath {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.points == other.points
            && self.closed == other.closed
            && self.appearance == other.appearance
            && self.simplification_epsilon == other.simplification_epsilon
    }
}

impl DrawPath {
    /// Create a new empty path.
    pub fn new(appearance: Appearance) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            closed: false,
            appearance,
            simplification_epsilon: 0.0,
            show_points: false,
            pending: false,
            boundary: None,
        }
    }

    /// Create a path from already tagged points.
    pub fn from_points(points: Vec<PathPoint>, closed: bool, appearance: Appearance) -> Self {
        Self {
            points,
            closed,
            ..Self::new(appearance)
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> PathId {
        self.id
    }

    /// The current point list.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Mutable access to the point list. Drops the cached boundary.
    pub fn points_mut(&mut self) -> &mut Vec<PathPoint> {
        self.boundary = None;
        &mut self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the path has enough points to have a boundary worth drawing or saving.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Append a raw sample while a gesture is in progress.
    pub fn add_point(&mut self, position: Point) {
        self.points.push(PathPoint::at(position));
        self.pending = true;
        self.boundary = None;
    }

    /// Append an already tagged point (e.g. from the SVG parser).
    pub fn push_point(&mut self, point: PathPoint) {
        self.points.push(point);
        self.boundary = None;
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.pending = false;
        self.boundary = None;
    }

    /// Simplify the raw samples and derive handles.
    ///
    /// Does nothing unless samples were added since the last call.
    pub fn finalize(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        let mut simplified = curve::simplify(&self.points, self.simplification_epsilon);
        curve::synthesize_handles(&mut simplified, self.closed);
        self.points = simplified;
        self.boundary = None;
    }

    /// Materialize the boundary from the point list.
    pub fn cache_boundary(&mut self) {
        self.boundary = Some(self.generate_boundary());
    }

    /// Cache the boundary unless it is already cached.
    pub fn ensure_boundary(&mut self) {
        if self.boundary.is_none() {
            self.cache_boundary();
        }
    }

    /// Drop the cached boundary.
    pub fn invalidate(&mut self) {
        self.boundary = None;
    }

    /// The cached boundary, if any.
    pub fn boundary(&self) -> Option<&BezPath> {
        self.boundary.as_ref()
    }

    /// The cached boundary, or a freshly generated one that is not stored.
    pub fn boundary_or_generate(&self) -> Cow<'_, BezPath> {
        match &self.boundary {
            Some(boundary) => Cow::Borrowed(boundary),
            None => Cow::Owned(self.generate_boundary()),
        }
    }

    /// Build the boundary implied by the point list.
    ///
    /// The first point and every `Move` point start a subpath; every other
    /// point is reached by a cubic from the previous point's outgoing handle
    /// and its own incoming handle (a line when both are zero).
    pub fn generate_boundary(&self) -> BezPath {
        let mut path = BezPath::new();

        for (i, point) in self.points.iter().enumerate() {
            if i == 0 || point.is_move() {
                if i > 0 && self.closed {
                    path.close_path();
                }
                path.move_to(point.position);
                continue;
            }

            let prev = &self.points[i - 1];
            let out = prev.right_handle.unwrap_or(Vec2::ZERO);
            let inc = point.left_handle.unwrap_or(Vec2::ZERO);
            if out == Vec2::ZERO && inc == Vec2::ZERO {
                path.line_to(point.position);
            } else {
                path.curve_to(
                    prev.position + out,
                    point.position + inc,
                    point.position,
                );
            }
        }

        if self.closed && !self.points.is_empty() {
            path.close_path();
        }
        path
    }

    /// Move every point by `delta`. Handles are relative and stay as they are.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            point.position += delta;
        }
        self.boundary = None;
    }

    /// Bounding box of the boundary, or `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.boundary_or_generate().bounding_box())
    }

    /// Number of subpaths (the first point plus every later `Move`).
    pub fn subpath_count(&self) -> usize {
        self.points
            .iter()
            .enumerate()
            .filter(|(i, p)| *i == 0 || p.command == Command::Move)
            .count()
    }
}
