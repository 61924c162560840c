//! Tool system: each tool turns pointer gestures into document edits.

mod eraser;
mod paint;
mod pan;
mod rectangle;
mod selection;
mod spray;

pub use eraser::EraserTool;
pub use paint::PaintTool;
pub use pan::PanTool;
pub use rectangle::RectangleTool;
pub use selection::SelectionTool;
pub use spray::SprayTool;

use crate::camera::Camera;
use crate::document::Document;
use crate::input::PointerEvent;
use crate::path::DrawPath;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// Generate a seed for a new tool instance.
/// Uses a counter + hash so consecutive tools get well spread seeds.
fn generate_tool_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static SEED_COUNTER: AtomicU64 = AtomicU64::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix64 finalizer
    let mut x = counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Paint,
    Eraser,
    Select,
    Pan,
    Spray,
    Rectangle,
}

/// What a tool may touch while handling an event.
pub struct ToolContext<'a> {
    pub document: &'a mut Document,
    pub camera: &'a mut Camera,
    pub settings: &'a Settings,
}

/// The active tool.
#[derive(Debug, Clone)]
pub enum Tool {
    Paint(PaintTool),
    Eraser(EraserTool),
    Select(SelectionTool),
    Pan(PanTool),
    Spray(SprayTool),
    Rectangle(RectangleTool),
}

impl Default for Tool {
    fn default() -> Self {
        Self::new(ToolKind::default())
    }
}

impl Tool {
    /// Create a tool of the given kind in its idle state.
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Paint => Tool::Paint(PaintTool::default()),
            ToolKind::Eraser => Tool::Eraser(EraserTool::default()),
            ToolKind::Select => Tool::Select(SelectionTool::default()),
            ToolKind::Pan => Tool::Pan(PanTool::default()),
            ToolKind::Spray => Tool::Spray(SprayTool::with_seed(generate_tool_seed())),
            ToolKind::Rectangle => Tool::Rectangle(RectangleTool::default()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Paint(_) => ToolKind::Paint,
            Tool::Eraser(_) => ToolKind::Eraser,
            Tool::Select(_) => ToolKind::Select,
            Tool::Pan(_) => ToolKind::Pan,
            Tool::Spray(_) => ToolKind::Spray,
            Tool::Rectangle(_) => ToolKind::Rectangle,
        }
    }

    /// Re-synchronize with a document that was replaced underneath the tool
    /// (tool switch, undo, redo, load).
    pub fn init(&mut self, document: &Document) {
        match self {
            Tool::Paint(tool) => tool.init(),
            Tool::Eraser(tool) => tool.init(),
            Tool::Select(tool) => tool.init(document),
            Tool::Pan(tool) => tool.init(),
            Tool::Spray(tool) => tool.init(),
            Tool::Rectangle(tool) => tool.init(),
        }
    }

    /// Handle one pointer event. Returns whether anything visible changed.
    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        match self {
            Tool::Paint(tool) => tool.handle_event(event, ctx),
            Tool::Eraser(tool) => tool.handle_event(event, ctx),
            Tool::Select(tool) => tool.handle_event(event, ctx),
            Tool::Pan(tool) => tool.handle_event(event, ctx),
            Tool::Spray(tool) => tool.handle_event(event, ctx),
            Tool::Rectangle(tool) => tool.handle_event(event, ctx),
        }
    }

    /// Transient paths drawn on top of the document.
    pub fn overlay_paths(&self) -> &[DrawPath] {
        match self {
            Tool::Eraser(tool) => tool.overlay_paths(),
            Tool::Select(tool) => tool.overlay_paths(),
            Tool::Paint(_) | Tool::Pan(_) | Tool::Spray(_) | Tool::Rectangle(_) => &[],
        }
    }

    /// Whether the gesture that just ended changed the document.
    ///
    /// Reading the answer clears it, so each gesture is recorded at most once.
    pub fn take_history_record(&mut self) -> bool {
        match self {
            Tool::Paint(tool) => tool.take_committed(),
            Tool::Eraser(tool) => tool.take_committed(),
            Tool::Select(tool) => tool.take_committed(),
            Tool::Pan(_) => false,
            Tool::Spray(tool) => tool.take_committed(),
            Tool::Rectangle(tool) => tool.take_committed(),
        }
    }
}
