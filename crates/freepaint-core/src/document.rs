//! The drawing document: page size, background and paths in paint order.

use crate::appearance::SerializableColor;
use crate::boolean::Region;
use crate::geometry::rects_overlap;
use crate::path::{DrawPath, PathId};
use crate::settings::Settings;
use kurbo::{Rect, Vec2};

/// A page of paths, painted back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub paths: Vec<DrawPath>,
    pub width: f64,
    pub height: f64,
    pub background: SerializableColor,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Document {
    /// Create an empty document.
    pub fn new(width: f64, height: f64, background: SerializableColor) -> Self {
        Self {
            paths: Vec::new(),
            width,
            height,
            background,
        }
    }

    /// Create an empty document with the page size and background of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.document_width,
            settings.document_height,
            settings.background,
        )
    }

    /// The page rectangle.
    pub fn page(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Add a path on top and return its id.
    pub fn add_path(&mut self, path: DrawPath) -> PathId {
        let id = path.id();
        self.paths.push(path);
        id
    }

    /// Get a path by ID.
    pub fn path(&self, id: PathId) -> Option<&DrawPath> {
        self.paths.iter().find(|path| path.id() == id)
    }

    /// Get a mutable reference to a path by ID.
    pub fn path_mut(&mut self, id: PathId) -> Option<&mut DrawPath> {
        self.paths.iter_mut().find(|path| path.id() == id)
    }

    /// Remove a path from the document.
    pub fn remove_path(&mut self, id: PathId) -> Option<DrawPath> {
        let index = self.paths.iter().position(|path| path.id() == id)?;
        Some(self.paths.remove(index))
    }

    /// Replace every path (undo/redo, load) and cache their boundaries.
    pub fn set_paths(&mut self, paths: Vec<DrawPath>) {
        self.paths = paths;
        self.refresh_boundaries();
    }

    /// Cache the boundary of every path that lacks one.
    pub fn refresh_boundaries(&mut self) {
        for path in &mut self.paths {
            path.ensure_boundary();
        }
    }

    /// Drop paths with fewer than 2 points. Returns how many were removed.
    pub fn remove_degenerate(&mut self) -> usize {
        let before = self.paths.len();
        self.paths.retain(DrawPath::is_renderable);
        let removed = before - self.paths.len();
        if removed > 0 {
            log::debug!("Removed {} degenerate paths", removed);
        }
        removed
    }

    /// Erase `eraser` from every path. Returns how many paths changed.
    pub fn erase(&mut self, eraser: &DrawPath) -> usize {
        let Some(boundary) = eraser.boundary() else {
            log::debug!("Eraser {} has no cached boundary; skipping erase", eraser.id());
            return 0;
        };
        // Flatten the eraser once for the whole document.
        let clip = Region::new(boundary);
        let changed = self
            .paths
            .iter_mut()
            .map(|path| path.erase_region(&clip))
            .filter(|&changed| changed)
            .count();
        log::debug!("Eraser changed {} of {} paths", changed, self.paths.len());
        changed
    }

    /// Ids of paths whose bounds overlap `rect`.
    pub fn paths_in_rect(&self, rect: Rect) -> Vec<PathId> {
        self.paths
            .iter()
            .filter(|path| path.bounds().is_some_and(|bounds| rects_overlap(bounds, rect)))
            .map(DrawPath::id)
            .collect()
    }

    /// Union of the bounds of the given paths.
    pub fn bounds_of(&self, ids: &[PathId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|&id| self.path(id)?.bounds())
            .reduce(|a, b| a.union(b))
    }

    /// Move the given paths by `delta`.
    pub fn translate_paths(&mut self, ids: &[PathId], delta: Vec2) {
        for path in self.paths.iter_mut().filter(|path| ids.contains(&path.id())) {
            path.translate(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Appearance;
    use crate::point::PathPoint;
    use kurbo::Point;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawPath {
        DrawPath::from_points(
            vec![PathPoint::new(x0, y0), PathPoint::new(x1, y1)],
            false,
            Appearance::default(),
        )
    }

    #[test]
    fn test_defaults_follow_settings() {
        let document = Document::default();
        assert_eq!(document.width, 816.0);
        assert_eq!(document.height, 1056.0);
        assert_eq!(document.background, SerializableColor::white());
        assert_eq!(document.page(), Rect::new(0.0, 0.0, 816.0, 1056.0));
    }

    #[test]
    fn test_add_get_remove() {
        let mut document = Document::default();
        let id = document.add_path(line(0.0, 0.0, 1.0, 1.0));
        assert!(document.path(id).is_some());
        assert!(document.path_mut(id).is_some());
        assert!(document.remove_path(id).is_some());
        assert!(document.path(id).is_none());
        assert!(document.remove_path(id).is_none());
    }

    #[test]
    fn test_remove_degenerate() {
        let mut document = Document::default();
        document.add_path(line(0.0, 0.0, 1.0, 1.0));
        document.add_path(DrawPath::from_points(
            vec![PathPoint::new(0.0, 0.0)],
            false,
            Appearance::default(),
        ));
        document.add_path(DrawPath::default());
        assert_eq!(document.remove_degenerate(), 2);
        assert_eq!(document.paths.len(), 1);
    }

    #[test]
    fn test_set_paths_caches_boundaries() {
        let mut document = Document::default();
        document.set_paths(vec![line(0.0, 0.0, 1.0, 1.0), line(2.0, 2.0, 3.0, 3.0)]);
        assert!(document.paths.iter().all(|path| path.boundary().is_some()));
    }

    #[test]
    fn test_selection_queries() {
        let mut document = Document::default();
        let a = document.add_path(line(0.0, 0.0, 10.0, 10.0));
        let b = document.add_path(line(50.0, 50.0, 60.0, 50.0));
        let _c = document.add_path(line(100.0, 100.0, 110.0, 110.0));

        let hits = document.paths_in_rect(Rect::new(5.0, 5.0, 55.0, 55.0));
        assert_eq!(hits, vec![a, b]);
        assert_eq!(
            document.bounds_of(&hits),
            Some(Rect::new(0.0, 0.0, 60.0, 50.0))
        );

        document.translate_paths(&[b], Vec2::new(1.0, 1.0));
        let moved = document.path(b).unwrap();
        assert_eq!(moved.points()[0].position, Point::new(51.0, 51.0));
        assert_eq!(document.path(a).unwrap().points()[0].position, Point::ZERO);
    }
}
