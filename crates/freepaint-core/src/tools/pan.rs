//! Grab-style panning.

use super::ToolContext;
use crate::input::PointerEvent;
use kurbo::Point;

/// Keeps the document point grabbed at `Down` under the pointer.
#[derive(Debug, Clone, Default)]
pub struct PanTool {
    anchor: Option<Point>,
}

impl PanTool {
    pub fn init(&mut self) {
        self.anchor = None;
    }

    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.anchor = Some(p);
                false
            }
            PointerEvent::Move(p) => {
                let Some(anchor) = self.anchor else {
                    return false;
                };
                // `p` is in document space under the current camera.
                let screen = ctx.camera.world_to_screen(p);
                ctx.camera.pin(anchor, screen);
                true
            }
            PointerEvent::Up => {
                self.anchor = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::document::Document;
    use crate::settings::Settings;
    use kurbo::Vec2;

    #[test]
    fn test_grab_pan() {
        let mut document = Document::default();
        let mut camera = Camera { offset: Vec2::ZERO, zoom: 2.0 };
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = PanTool::default();

        let grab_screen = Point::new(100.0, 100.0);
        let grabbed = ctx.camera.screen_to_world(grab_screen);
        tool.handle_event(PointerEvent::Down(grabbed), &mut ctx);

        let pointer = Point::new(140.0, 70.0);
        let moved = ctx.camera.screen_to_world(pointer);
        assert!(tool.handle_event(PointerEvent::Move(moved), &mut ctx));
        assert!((ctx.camera.world_to_screen(grabbed) - pointer).hypot() < 1e-9);
        assert_eq!(ctx.camera.offset, Vec2::new(40.0, -30.0));

        tool.handle_event(PointerEvent::Up, &mut ctx);
        assert!(!tool.handle_event(PointerEvent::Move(moved), &mut ctx));
    }
}
