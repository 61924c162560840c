//! Pointer input delivered to tools.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// One pointer sample of a gesture: down, any number of moves, then up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

impl PointerEvent {
    /// Pointer position, if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) => Some(p),
            PointerEvent::Up => None,
        }
    }

    /// Same event with its position mapped through `transform`.
    pub fn transformed(self, transform: Affine) -> Self {
        match self {
            PointerEvent::Down(p) => PointerEvent::Down(transform * p),
            PointerEvent::Move(p) => PointerEvent::Move(transform * p),
            PointerEvent::Up => PointerEvent::Up,
        }
    }
}
