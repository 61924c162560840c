//! Containment tests and erasing one path's region from another.

use crate::appearance::SerializableColor;
use crate::boolean::{Difference, Region};
use crate::path::DrawPath;
use crate::point::{Command, PathPoint};
use kurbo::{BezPath, PathEl, Point};

/// Radius of the disc used by [`DrawPath::contains`].
pub const CONTAINMENT_RADIUS: f64 = 1.0;

/// Highlight given to the first point after an erased run of a stroke.
const PEN_DOWN_HIGHLIGHT: SerializableColor = SerializableColor::green();

impl DrawPath {
    /// Whether `point` lies inside this path's region.
    ///
    /// A disc of [`CONTAINMENT_RADIUS`] around the point must be entirely
    /// covered by the region, so points on (or within the radius of) the
    /// boundary are outside.
    pub fn contains(&self, point: Point) -> bool {
        Region::new(&self.boundary_or_generate()).covers_disc(point, CONTAINMENT_RADIUS)
    }

    /// Remove the region of `eraser` from this path.
    ///
    /// Closed paths are cut with a boolean difference and come back as line
    /// segments. Open strokes lose every point inside the eraser; the first
    /// point after each removed run starts a new subpath. Both paths need a
    /// cached boundary, otherwise nothing happens. Returns whether the path
    /// changed.
    pub fn erase(&mut self, eraser: &DrawPath) -> bool {
        let Some(clip) = eraser.boundary() else {
            log::debug!("Eraser {} has no cached boundary; skipping erase", eraser.id());
            return false;
        };
        self.erase_region(&Region::new(clip))
    }

    /// Like [`erase`](Self::erase), with the eraser already flattened.
    pub fn erase_region(&mut self, clip: &Region) -> bool {
        let Some(subject) = self.boundary() else {
            log::debug!("Path {} has no cached boundary; skipping erase", self.id());
            return false;
        };

        let changed = if self.closed {
            let result = Region::new(subject).difference(clip);
            self.apply_difference(result)
        } else {
            self.erase_stroke(clip)
        };
        if changed {
            self.cache_boundary();
        }
        changed
    }

    fn apply_difference(&mut self, result: Difference) -> bool {
        match result {
            Difference::Unchanged => false,
            Difference::Empty => {
                self.points_mut().clear();
                true
            }
            Difference::Region(region) => {
                *self.points_mut() = points_from_boundary(&region);
                true
            }
        }
    }

    fn erase_stroke(&mut self, clip: &Region) -> bool {
        let mut in_run = false;
        let mut changed = false;
        let mut kept = Vec::with_capacity(self.len());

        for point in self.points() {
            if clip.covers_disc(point.position, CONTAINMENT_RADIUS) {
                in_run = true;
                changed = true;
                continue;
            }
            let mut point = *point;
            if in_run {
                point.command = Command::Move;
                point.highlight = PEN_DOWN_HIGHLIGHT;
                in_run = false;
            }
            kept.push(point);
        }

        if changed {
            *self.points_mut() = kept;
        }
        changed
    }
}

/// Re-extract a point list from a boundary: a `Move` point per subpath start,
/// `Line` points for every other segment end. Curves are reduced to their end
/// points.
pub fn points_from_boundary(boundary: &BezPath) -> Vec<PathPoint> {
    boundary
        .elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::MoveTo(p) => Some(PathPoint::at(p).with_command(Command::Move)),
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                Some(PathPoint::at(p).with_command(Command::Line))
            }
            PathEl::ClosePath => None,
        })
        .collect()
}
