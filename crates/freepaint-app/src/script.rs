//! Gesture scripts: a JSON list of steps replayed against a [`Canvas`].

use crate::AppError;
use freepaint_core::{Canvas, PointerEvent, ToolKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single scripted action. Pointer coordinates are in document space,
/// zoom anchors in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Tool { kind: ToolKind },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Undo,
    Redo,
    Zoom { x: f64, y: f64, factor: f64 },
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Replay every step of `script` on `canvas`.
pub fn run(canvas: &mut Canvas, script: &Script) {
    for step in &script.steps {
        apply(canvas, step);
    }
    log::info!(
        "Replayed {} steps: {} paths, history {}/{}",
        script.steps.len(),
        canvas.document.paths.len(),
        canvas.history().cursor().map_or(0, |cursor| cursor + 1),
        canvas.history().len()
    );
}

fn apply(canvas: &mut Canvas, step: &Step) {
    match *step {
        Step::Tool { kind } => canvas.set_tool(kind),
        Step::Down { x, y } => {
            canvas.handle_event(PointerEvent::Down(Point::new(x, y)));
        }
        Step::Move { x, y } => {
            canvas.handle_event(PointerEvent::Move(Point::new(x, y)));
        }
        Step::Up => {
            canvas.handle_event(PointerEvent::Up);
        }
        Step::Undo => canvas.undo(),
        Step::Redo => {
            if !canvas.redo() {
                log::debug!("Nothing to redo");
            }
        }
        Step::Zoom { x, y, factor } => canvas.zoom_at(Point::new(x, y), factor),
    }
}
