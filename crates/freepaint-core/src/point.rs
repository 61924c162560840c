//! Path vertices with relative Bézier control handles.

use crate::appearance::SerializableColor;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// How a point connects to the point before it (mirrors SVG path commands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Command {
    /// Raw sample, connected like a line/curve once finalized.
    #[default]
    None,
    /// Lift the pen: starts a new subpath.
    Move,
    Line,
    Horizontal,
    Vertical,
    CubicBezier,
    SmoothCubicBezier,
    /// The point is itself a control handle. Only used transiently.
    Handle,
}

impl Command {
    /// Map an SVG path command letter to a command and its "relative" flag.
    pub fn from_svg_letter(letter: char) -> Option<(Command, bool)> {
        let command = match letter.to_ascii_uppercase() {
            'M' => Command::Move,
            'L' => Command::Line,
            'H' => Command::Horizontal,
            'V' => Command::Vertical,
            'C' => Command::CubicBezier,
            'S' => Command::SmoothCubicBezier,
            _ => return None,
        };
        Some((command, letter.is_ascii_lowercase()))
    }

    /// Number of scalar arguments one instance of this command consumes.
    pub fn arity(self) -> usize {
        match self {
            Command::Move | Command::Line => 2,
            Command::Horizontal | Command::Vertical => 1,
            Command::CubicBezier => 6,
            Command::SmoothCubicBezier => 4,
            Command::None | Command::Handle => 0,
        }
    }
}

/// A vertex of a [`DrawPath`](crate::path::DrawPath).
///
/// Handles are stored as offsets from `position`, so translating a point
/// never needs to touch its handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Point,
    pub command: Command,
    /// Incoming control handle, relative to `position`.
    pub left_handle: Option<Vec2>,
    /// Outgoing control handle, relative to `position`.
    pub right_handle: Option<Vec2>,
    /// Marker color for point overlays.
    pub highlight: SerializableColor,
}

impl PathPoint {
    /// Create an untagged point without handles.
    pub fn new(x: f64, y: f64) -> Self {
        Self::at(Point::new(x, y))
    }

    /// Create an untagged point at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            command: Command::None,
            left_handle: None,
            right_handle: None,
            highlight: SerializableColor::white(),
        }
    }

    /// Builder-style command override.
    pub fn with_command(mut self, command: Command) -> Self {
        self.command = command;
        self
    }

    /// Whether this point starts a new subpath.
    pub fn is_move(&self) -> bool {
        self.command == Command::Move
    }

    /// Absolute position of the incoming handle (the point itself if there is none).
    pub fn left_handle_position(&self) -> Point {
        self.position + self.left_handle.unwrap_or(Vec2::ZERO)
    }

    /// Absolute position of the outgoing handle (the point itself if there is none).
    pub fn right_handle_position(&self) -> Point {
        self.position + self.right_handle.unwrap_or(Vec2::ZERO)
    }

    /// Set the incoming handle from an absolute position.
    pub fn set_left_handle_position(&mut self, handle: Point) {
        self.left_handle = Some(handle - self.position);
    }

    /// Set the outgoing handle from an absolute position.
    pub fn set_right_handle_position(&mut self, handle: Point) {
        self.right_handle = Some(handle - self.position);
    }

    /// Drop both handles.
    pub fn clear_handles(&mut self) {
        self.left_handle = None;
        self.right_handle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_letters() {
        assert_eq!(Command::from_svg_letter('M'), Some((Command::Move, false)));
        assert_eq!(Command::from_svg_letter('c'), Some((Command::CubicBezier, true)));
        assert_eq!(Command::from_svg_letter('A'), None);
        assert_eq!(Command::CubicBezier.arity(), 6);
        assert_eq!(Command::Vertical.arity(), 1);
    }

    #[test]
    fn test_handles_are_relative() {
        let mut point = PathPoint::new(10.0, 10.0);
        point.set_right_handle_position(Point::new(12.0, 10.0));
        assert_eq!(point.right_handle, Some(Vec2::new(2.0, 0.0)));

        point.position += Vec2::new(5.0, 5.0);
        assert_eq!(point.right_handle_position(), Point::new(17.0, 15.0));
        assert_eq!(point.left_handle_position(), point.position);
    }
}
