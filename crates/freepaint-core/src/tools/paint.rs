//! Freehand painting.

use super::ToolContext;
use crate::input::PointerEvent;
use crate::path::{DrawPath, PathId};

/// Draws one smoothed stroke per gesture.
#[derive(Debug, Clone, Default)]
pub struct PaintTool {
    current: Option<PathId>,
    committed: bool,
}

impl PaintTool {
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
                let mut path = DrawPath::new(ctx.settings.appearance());
                path.simplification_epsilon = ctx.settings.simplification_epsilon;
                path.add_point(p);
                self.current = Some(ctx.document.add_path(path));
                self.committed = false;
                true
            }
            PointerEvent::Move(p) => {
                let Some(path) = self.current.and_then(|id| ctx.document.path_mut(id)) else {
                    return false;
                };
                path.add_point(p);
                true
            }
            PointerEvent::Up => {
                let Some(id) = self.current.take() else {
                    return false;
                };
                let Some(path) = ctx.document.path_mut(id) else {
                    return false;
                };
                if path.len() < 2 {
                    log::debug!("Discarding stroke with {} samples", path.len());
                    ctx.document.remove_path(id);
                    return true;
                }
                let samples = path.len();
                path.finalize();
                path.cache_boundary();
                log::debug!("Stroke finalized: {} samples -> {} points", samples, path.len());
                self.committed = true;
                true
            }
        }
    }
}
