//! Draw-command statistics for a rendered page.

use freepaint_core::Canvas;
use freepaint_render::{DisplayListRenderer, Paint, RenderContext, Renderer};

/// How many fill and stroke commands a page renders to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    pub fills: usize,
    pub strokes: usize,
}

impl FrameSummary {
    /// Render the page without tool overlays and count the commands.
    pub fn of(canvas: &Canvas) -> Self {
        let viewport = canvas.document.page().size();
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(canvas, viewport).without_overlays());

        let mut summary = Self::default();
        for command in renderer.commands() {
            match command.paint {
                Paint::Fill(_) => summary.fills += 1,
                Paint::Stroke { .. } => summary.strokes += 1,
            }
        }
        summary
    }
}
