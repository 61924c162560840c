//! Axis-aligned rectangles.

use super::ToolContext;
use crate::input::PointerEvent;
use crate::path::{DrawPath, PathId};
use crate::point::{Command, PathPoint};
use kurbo::{Point, Rect, Size};

/// Rectangles narrower or shorter than this are dropped on release.
const MIN_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct RectangleTool {
    current: Option<PathId>,
    start: Point,
    committed: bool,
}

impl RectangleTool {
    pub fn init(&mut self) {
        self.current = None;
        self.committed = false;
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    pub fn take_committed(&mut self) -> bool {
        std::mem::take(&mut self.committed)
    }

    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.start = p;
                self.committed = false;
                let path = DrawPath::from_points(corners(p, p), true, ctx.settings.appearance());
                self.current = Some(ctx.document.add_path(path));
                true
            }
            PointerEvent::Move(p) => {
                let Some(path) = self.current.and_then(|id| ctx.document.path_mut(id)) else {
                    return false;
                };
                *path.points_mut() = corners(self.start, p);
                true
            }
            PointerEvent::Up => {
                let Some(id) = self.current.take() else {
                    return false;
                };
                let Some(path) = ctx.document.path_mut(id) else {
                    return false;
                };
                let size = path.bounds().map(|bounds| bounds.size()).unwrap_or(Size::ZERO);
                if size.width < MIN_SIZE || size.height < MIN_SIZE {
                    log::debug!("Dropping degenerate rectangle {}x{}", size.width, size.height);
                    ctx.document.remove_path(id);
                    return true;
                }
                path.cache_boundary();
                self.committed = true;
                true
            }
        }
    }
}

/// The four corners of the rectangle spanned by `a` and `b`, as sharp line
/// segments.
fn corners(a: Point, b: Point) -> Vec<PathPoint> {
    let rect = Rect::from_points(a, b);
    vec![
        PathPoint::new(rect.x0, rect.y0).with_command(Command::Move),
        PathPoint::new(rect.x1, rect.y0).with_command(Command::Line),
        PathPoint::new(rect.x1, rect.y1).with_command(Command::Line),
        PathPoint::new(rect.x0, rect.y1).with_command(Command::Line),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::document::Document;
    use crate::settings::Settings;

    #[test]
    fn test_draw_rectangle() {
        let mut document = Document::default();
        let mut camera = Camera::default();
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = RectangleTool::default();

        tool.handle_event(PointerEvent::Down(Point::new(30.0, 40.0)), &mut ctx);
        tool.handle_event(PointerEvent::Move(Point::new(20.0, 20.0)), &mut ctx);
        tool.handle_event(PointerEvent::Move(Point::new(10.0, 10.0)), &mut ctx);
        tool.handle_event(PointerEvent::Up, &mut ctx);

        assert!(tool.committed());
        let path = &ctx.document.paths[0];
        assert!(path.closed);
        assert_eq!(path.bounds(), Some(Rect::new(10.0, 10.0, 30.0, 40.0)));
        assert!(path.points().iter().all(|p| p.left_handle.is_none() && p.right_handle.is_none()));
        assert!(path.boundary().is_some());
    }

    #[test]
    fn test_degenerate_rectangle_dropped() {
        let mut document = Document::default();
        let mut camera = Camera::default();
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = RectangleTool::default();

        tool.handle_event(PointerEvent::Down(Point::new(5.0, 5.0)), &mut ctx);
        tool.handle_event(PointerEvent::Move(Point::new(50.0, 5.2)), &mut ctx);
        tool.handle_event(PointerEvent::Up, &mut ctx);
        assert!(!tool.committed());
        assert!(ctx.document.paths.is_empty());
    }
}
