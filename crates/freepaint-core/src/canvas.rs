//! Canvas session: document, view, history and the active tool.

use crate::camera::Camera;
use crate::document::Document;
use crate::history::History;
use crate::input::PointerEvent;
use crate::path::DrawPath;
use crate::settings::Settings;
use crate::svg::{self, SvgError};
use crate::tools::{Tool, ToolContext, ToolKind};
use kurbo::Point;
use std::io::{Read, Write};
use std::path::Path;

/// An editing session.
///
/// Every completed gesture that changed the document leaves one history
/// snapshot behind.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub document: Document,
    pub camera: Camera,
    pub settings: Settings,
    history: History,
    tool: Tool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Canvas {
    /// Create a session with an empty document.
    pub fn new(settings: Settings) -> Self {
        Self {
            document: Document::from_settings(&settings),
            camera: Camera::default(),
            history: History::new(settings.history_capacity),
            tool: Tool::default(),
            settings,
        }
    }

    /// Handle a pointer event in document coordinates.
    ///
    /// Returns whether anything visible changed.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        let mut ctx = ToolContext {
            document: &mut self.document,
            camera: &mut self.camera,
            settings: &self.settings,
        };
        let changed = self.tool.handle_event(event, &mut ctx);

        if event == PointerEvent::Up {
            self.document.refresh_boundaries();
            self.document.remove_degenerate();
            if self.tool.take_history_record() {
                self.history.record(&self.document.paths);
            }
        }
        changed
    }

    /// Handle a pointer event in screen coordinates.
    pub fn handle_screen_event(&mut self, event: PointerEvent) -> bool {
        let event = event.transformed(self.camera.inverse_transform());
        self.handle_event(event)
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Switch tools. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, kind: ToolKind) {
        log::debug!("Switching tool to {:?}", kind);
        self.tool = Tool::new(kind);
        self.tool.init(&self.document);
    }

    /// Paths the active tool draws on top of the document.
    pub fn overlay_paths(&self) -> &[DrawPath] {
        self.tool.overlay_paths()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Step back one snapshot. Undoing past the first snapshot empties the page.
    pub fn undo(&mut self) {
        let paths = self.history.undo();
        self.document.set_paths(paths);
        self.tool.init(&self.document);
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(paths) = self.history.redo() else {
            return false;
        };
        self.document.set_paths(paths);
        self.tool.init(&self.document);
        true
    }

    /// Zoom the view around a screen point.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.camera.zoom_at(screen_point, factor);
    }

    /// Replace the document with one read from SVG.
    ///
    /// On error the current document and history are left untouched.
    pub fn load_svg(&mut self, reader: impl Read) -> Result<(), SvgError> {
        let document = svg::read_document(reader)?;
        self.replace_document(document);
        Ok(())
    }

    /// Write the document as SVG.
    pub fn save_svg(&self, writer: impl Write) -> Result<(), SvgError> {
        svg::write_document(&self.document, writer)
    }

    /// Replace the document with an SVG file.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), SvgError> {
        let document = svg::open_file(path)?;
        self.replace_document(document);
        Ok(())
    }

    /// Save the document to an SVG file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SvgError> {
        svg::save_file(&self.document, path)
    }

    fn replace_document(&mut self, document: Document) {
        log::info!("Loaded document with {} paths", document.paths.len());
        self.document = document;
        self.document.refresh_boundaries();
        self.camera.reset();
        self.history.clear();
        self.history.record(&self.document.paths);
        self.tool.init(&self.document);
    }
}
