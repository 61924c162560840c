//! Bounded undo/redo history of path list snapshots.

use crate::path::DrawPath;
use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 256;

/// Snapshot stack with a cursor.
///
/// `cursor` is the snapshot the document currently shows; `None` is the empty
/// document before the first snapshot. Recording after an undo discards the
/// redo branch.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Vec<DrawPath>>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Create an empty history keeping at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Store a deep copy of `paths` as the newest snapshot.
    pub fn record(&mut self, paths: &[DrawPath]) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push_back(paths.to_vec());
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = Some(self.snapshots.len() - 1);
        log::debug!(
            "Recorded snapshot {} of {} ({} paths)",
            self.snapshots.len(),
            self.capacity,
            paths.len()
        );
    }

    /// Step back one snapshot and return a copy of it.
    ///
    /// Stepping back from the oldest snapshot yields the empty document.
    pub fn undo(&mut self) -> Vec<DrawPath> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.snapshots[cursor - 1].clone()
            }
            _ => {
                self.cursor = None;
                Vec::new()
            }
        }
    }

    /// Step forward one snapshot and return a copy of it, if there is one.
    pub fn redo(&mut self) -> Option<Vec<DrawPath>> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if next >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(self.snapshots[next].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |cursor| cursor + 1) < self.snapshots.len()
    }

    /// Forget every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Appearance;
    use crate::point::PathPoint;
    use kurbo::{Point, Vec2};

    fn paths(x: f64) -> Vec<DrawPath> {
        vec![DrawPath::from_points(
            vec![PathPoint::new(x, 0.0), PathPoint::new(x, 10.0)],
            false,
            Appearance::default(),
        )]
    }

    #[test]
    fn test_undo_returns_deep_copy() {
        let mut history = History::default();
        let a = paths(1.0);
        history.record(&a);
        history.record(&paths(2.0));

        let mut restored = history.undo();
        assert_eq!(restored, a);
        assert!(!std::ptr::eq(restored.as_ptr(), a.as_ptr()));

        // Mutating the copy must not touch the stored snapshot.
        restored[0].translate(Vec2::new(5.0, 5.0));
        history.record(&paths(3.0));
        history.undo();
        assert_eq!(history.redo().unwrap()[0].points()[0].position, Point::new(3.0, 0.0));
        assert_eq!(history.undo(), a);
    }

    #[test]
    fn test_record_truncates_redo_branch() {
        let mut history = History::default();
        history.record(&paths(1.0));
        assert!(history.undo().is_empty());
        history.record(&paths(3.0));

        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_past_start_is_empty() {
        let mut history = History::default();
        assert!(history.undo().is_empty());
        assert_eq!(history.redo(), None);

        history.record(&paths(1.0));
        assert!(history.undo().is_empty());
        assert!(history.undo().is_empty());
        assert!(!history.can_undo());

        // Redo from the empty state restores the first snapshot.
        let redone = history.redo().unwrap();
        assert_eq!(redone[0].points()[0].position, Point::new(1.0, 0.0));
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.record(&paths(i as f64));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));

        assert_eq!(history.undo()[0].points()[0].position.x, 3.0);
        assert_eq!(history.undo()[0].points()[0].position.x, 2.0);
        assert!(history.undo().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.record(&paths(1.0));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
