//! Rectangle selection and moving of selected paths.

use super::ToolContext;
use crate::appearance::{Appearance, Effect, SerializableColor};
use crate::document::Document;
use crate::input::PointerEvent;
use crate::path::{DrawPath, PathId};
use crate::point::{Command, PathPoint};
use kurbo::{Point, Rect};

const FRAME_COLOR: SerializableColor = SerializableColor::rgb(128, 128, 128);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Mode {
    #[default]
    Idle,
    /// Dragging out a new selection rectangle from `start`.
    Define { start: Point },
    /// Dragging the current selection; `last` is the previous pointer position.
    Move { last: Point },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    mode: Mode,
    selected: Vec<PathId>,
    frame: Option<Rect>,
    overlay: Vec<DrawPath>,
    moved: bool,
}

impl SelectionTool {
    /// Drop selected paths that no longer exist and refit the frame.
    pub fn init(&mut self, document: &Document) {
        self.mode = Mode::Idle;
        self.moved = false;
        self.selected.retain(|&id| document.path(id).is_some());
        self.frame = document.bounds_of(&self.selected);
        self.rebuild_overlay(document);
    }

    pub fn committed(&self) -> bool {
        self.moved
    }

    pub fn take_committed(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }

    pub fn selected(&self) -> &[PathId] {
        &self.selected
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn overlay_paths(&self) -> &[DrawPath] {
        &self.overlay
    }

    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.moved = false;
                let grabbed = !self.selected.is_empty() && self.frame.is_some_and(|frame| frame.contains(p));
                if grabbed {
                    self.mode = Mode::Move { last: p };
                } else {
                    self.mode = Mode::Define { start: p };
                    self.selected.clear();
                    self.frame = Some(Rect::from_points(p, p));
                }
            }
            PointerEvent::Move(p) => match self.mode {
                Mode::Idle => return false,
                Mode::Define { start } => self.frame = Some(Rect::from_points(start, p)),
                Mode::Move { last } => {
                    let delta = p - last;
                    ctx.document.translate_paths(&self.selected, delta);
                    self.frame = self.frame.map(|frame| frame + delta);
                    self.mode = Mode::Move { last: p };
                    self.moved = true;
                }
            },
            PointerEvent::Up => match std::mem::take(&mut self.mode) {
                Mode::Idle => return false,
                Mode::Define { .. } => {
                    if let Some(frame) = self.frame {
                        self.selected = ctx.document.paths_in_rect(frame);
                    }
                    self.frame = ctx.document.bounds_of(&self.selected);
                    log::debug!("Selected {} paths", self.selected.len());
                }
                Mode::Move { .. } => {
                    if self.moved {
                        ctx.document.refresh_boundaries();
                    }
                }
            },
        }
        self.rebuild_overlay(ctx.document);
        true
    }

    /// Frame outline plus a point view of every selected path.
    fn rebuild_overlay(&mut self, document: &Document) {
        self.overlay.clear();
        if let Some(frame) = self.frame {
            self.overlay.push(frame_path(frame));
        }
        for &id in &self.selected {
            if let Some(path) = document.path(id) {
                let mut copy = path.clone();
                copy.show_points = true;
                self.overlay.push(copy);
            }
        }
    }
}

fn frame_path(frame: Rect) -> DrawPath {
    let mut appearance = Appearance::new(Some(FRAME_COLOR), None).with_width(2.0);
    appearance.width_is_device_independent = true;
    appearance.effect = Effect::Dashed;
    let points = vec![
        PathPoint::new(frame.x0, frame.y0).with_command(Command::Move),
        PathPoint::new(frame.x1, frame.y0).with_command(Command::Line),
        PathPoint::new(frame.x1, frame.y1).with_command(Command::Line),
        PathPoint::new(frame.x0, frame.y1).with_command(Command::Line),
    ];
    DrawPath::from_points(points, true, appearance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::settings::Settings;
    use kurbo::Vec2;

    fn line(x: f64) -> DrawPath {
        DrawPath::from_points(
            vec![PathPoint::new(x, 0.0), PathPoint::new(x + 10.0, 10.0)],
            false,
            Appearance::default(),
        )
    }

    fn drag(tool: &mut SelectionTool, ctx: &mut ToolContext<'_>, from: Point, to: Point) {
        tool.handle_event(PointerEvent::Down(from), ctx);
        tool.handle_event(PointerEvent::Move(from.midpoint(to)), ctx);
        tool.handle_event(PointerEvent::Move(to), ctx);
        tool.handle_event(PointerEvent::Up, ctx);
    }

    #[test]
    fn test_select_then_move() {
        let mut document = Document::default();
        let a = document.add_path(line(0.0));
        let b = document.add_path(line(100.0));
        let mut camera = Camera::default();
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = SelectionTool::default();

        drag(&mut tool, &mut ctx, Point::new(-5.0, -5.0), Point::new(5.0, 5.0));
        assert_eq!(tool.selected(), &[a]);
        assert_eq!(tool.frame(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!tool.committed());
        assert_eq!(tool.overlay_paths().len(), 2);

        drag(&mut tool, &mut ctx, Point::new(5.0, 5.0), Point::new(25.0, 15.0));
        assert!(tool.committed());
        let moved = ctx.document.path(a).unwrap();
        assert_eq!(moved.points()[0].position, Point::new(20.0, 10.0));
        assert!(moved.boundary().is_some());
        assert_eq!(tool.frame(), Some(Rect::new(20.0, 10.0, 30.0, 20.0)));
        assert_eq!(ctx.document.path(b).unwrap().points()[0].position, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_empty_selection() {
        let mut document = Document::default();
        document.add_path(line(0.0));
        let mut camera = Camera::default();
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = SelectionTool::default();

        drag(&mut tool, &mut ctx, Point::new(200.0, 200.0), Point::new(300.0, 300.0));
        assert!(tool.selected().is_empty());
        assert_eq!(tool.frame(), None);
        assert!(tool.overlay_paths().is_empty());
    }

    #[test]
    fn test_init_drops_missing_paths() {
        let mut document = Document::default();
        let a = document.add_path(line(0.0));
        let mut tool = SelectionTool {
            selected: vec![a],
            frame: Some(Rect::new(0.0, 0.0, 1.0, 1.0)),
            ..SelectionTool::default()
        };
        document.translate_paths(&[a], Vec2::new(1.0, 0.0));
        tool.init(&document);
        assert_eq!(tool.frame(), Some(Rect::new(1.0, 0.0, 11.0, 10.0)));

        document.remove_path(a);
        tool.init(&document);
        assert!(tool.selected().is_empty());
        assert_eq!(tool.frame(), None);
    }
}
