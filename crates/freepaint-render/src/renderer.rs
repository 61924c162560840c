//! Renderer trait abstraction.

use freepaint_core::canvas::Canvas;
use kurbo::Size;
use peniko::Color;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Draw the active tool's overlay paths.
    pub show_overlays: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            scale_factor: 1.0,
            show_overlays: true,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Render the document only, e.g. for export.
    pub fn without_overlays(mut self) -> Self {
        self.show_overlays = false;
        self
    }

    /// Factor applied to device-independent stroke widths, so they keep
    /// their on-screen size at any zoom.
    pub fn density_correction(&self) -> f64 {
        self.scale_factor * self.canvas.camera.density_correction()
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.canvas.document.background.into()
    }
}
