//! Erasing with a freehand closed region.

use super::ToolContext;
use crate::appearance::{Appearance, SerializableColor};
use crate::input::PointerEvent;
use crate::path::DrawPath;

const PREVIEW_COLOR: SerializableColor = SerializableColor::new(0, 255, 0, 96);
const ERASER_COLOR: SerializableColor = SerializableColor::new(255, 0, 0, 128);

/// While a gesture is active the overlay holds previews of every document
/// path followed by the eraser region itself as the last entry.
#[derive(Debug, Clone, Default)]
pub struct EraserTool {
    overlay: Vec<DrawPath>,
    active: bool,
    committed: bool,
}

impl EraserTool {
    pub fn init(&mut self) {
        self.overlay.clear();
        self.active = false;
        self.committed = false;
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    pub fn take_committed(&mut self) -> bool {
        std::mem::take(&mut self.committed)
    }

    pub fn overlay_paths(&self) -> &[DrawPath] {
        &self.overlay
    }

    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.overlay = ctx.document.paths.iter().map(preview).collect();

                let mut eraser = DrawPath::new(Appearance::new(None, Some(ERASER_COLOR)));
                eraser.closed = true;
                eraser.simplification_epsilon = ctx.settings.simplification_epsilon;
                eraser.add_point(p);
                self.overlay.push(eraser);
                self.active = true;
                self.committed = false;
                true
            }
            PointerEvent::Move(p) => {
                if !self.active {
                    return false;
                }
                match self.overlay.last_mut() {
                    Some(eraser) => {
                        eraser.add_point(p);
                        true
                    }
                    None => false,
                }
            }
            PointerEvent::Up => {
                if !std::mem::take(&mut self.active) {
                    return false;
                }
                let eraser = self.overlay.pop();
                self.overlay.clear();
                let Some(mut eraser) = eraser else {
                    return false;
                };
                if eraser.len() < 3 {
                    log::debug!("Eraser gesture too short ({} samples)", eraser.len());
                    return true;
                }
                eraser.finalize();
                eraser.cache_boundary();
                self.committed = ctx.document.erase(&eraser) > 0;
                true
            }
        }
    }
}

/// A highlighted copy of a document path: closed paths filled, strokes with
/// their points shown.
fn preview(path: &DrawPath) -> DrawPath {
    let mut copy = path.clone();
    copy.appearance = if path.closed {
        Appearance::new(None, Some(PREVIEW_COLOR))
    } else {
        let mut appearance = Appearance::new(Some(PREVIEW_COLOR), None);
        appearance.stroke_width = path.appearance.stroke_width;
        copy.show_points = true;
        appearance
    };
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::document::Document;
    use crate::point::PathPoint;
    use crate::settings::Settings;
    use kurbo::Point;

    fn circle_gesture(center: Point, radius: f64) -> Vec<PointerEvent> {
        let mut events: Vec<PointerEvent> = (0..24)
            .map(|i| {
                let angle = i as f64 / 24.0 * std::f64::consts::TAU;
                let p = center + kurbo::Vec2::new(angle.cos(), angle.sin()) * radius;
                if i == 0 { PointerEvent::Down(p) } else { PointerEvent::Move(p) }
            })
            .collect();
        events.push(PointerEvent::Up);
        events
    }

    #[test]
    fn test_overlay_during_gesture() {
        let mut document = Document::default();
        document.add_path(DrawPath::from_points(
            vec![PathPoint::new(0.0, 0.0), PathPoint::new(10.0, 0.0)],
            false,
            Appearance::default(),
        ));
        let mut camera = Camera::default();
        let settings = Settings::default();
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = EraserTool::default();

        tool.handle_event(PointerEvent::Down(Point::new(50.0, 50.0)), &mut ctx);
        let overlay = tool.overlay_paths();
        assert_eq!(overlay.len(), 2);
        assert!(overlay[0].show_points);
        assert_eq!(overlay[0].appearance.stroke, Some(PREVIEW_COLOR));
        assert!(overlay[1].closed);

        // The preview must not alias the document path.
        assert_eq!(ctx.document.paths[0].appearance, Appearance::default());

        tool.handle_event(PointerEvent::Up, &mut ctx);
        assert!(tool.overlay_paths().is_empty());
        assert!(!tool.committed());
    }

    #[test]
    fn test_erase_stroke_points() {
        let mut document = Document::default();
        let points = (0..=40).map(|i| PathPoint::new(i as f64, 20.0)).collect();
        let mut stroke = DrawPath::from_points(points, false, Appearance::default());
        stroke.cache_boundary();
        document.add_path(stroke);

        let mut camera = Camera::default();
        let settings = Settings { simplification_epsilon: 0.1, ..Settings::default() };
        let mut ctx = ToolContext { document: &mut document, camera: &mut camera, settings: &settings };
        let mut tool = EraserTool::default();

        for event in circle_gesture(Point::new(20.0, 20.0), 6.0) {
            tool.handle_event(event, &mut ctx);
        }
        assert!(tool.committed());
        let stroke = &ctx.document.paths[0];
        assert!(stroke.len() < 41);
        assert_eq!(stroke.subpath_count(), 2);
        assert!(!stroke.points().iter().any(|p| p.position.x == 20.0));
    }
}
