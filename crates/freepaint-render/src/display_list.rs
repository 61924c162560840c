//! Backend-neutral renderer: records fill and stroke commands that any
//! 2D backend can replay.

use crate::renderer::{RenderContext, Renderer};
use freepaint_core::appearance::Appearance;
use freepaint_core::geometry::{circle, diamond};
use freepaint_core::path::DrawPath;
use kurbo::{Affine, BezPath, Cap, Join, Line, Rect, Shape, Stroke};
use peniko::Color;

/// Size of point markers, in screen pixels.
const MARKER_SIZE: f64 = 6.0;
/// Radius of handle markers, in screen pixels.
const HANDLE_RADIUS: f64 = 3.0;

const HANDLE_COLOR: Color = Color::from_rgba8(59, 130, 246, 255);
const MARKER_OUTLINE: Color = Color::from_rgba8(0, 0, 0, 255);

/// How a recorded shape is painted.
#[derive(Debug, Clone)]
pub enum Paint {
    /// Nonzero fill.
    Fill(Color),
    Stroke { style: Stroke, color: Color },
}

/// One recorded drawing operation.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Geometry in document coordinates.
    pub path: BezPath,
    /// Document to screen transform.
    pub transform: Affine,
    pub paint: Paint,
}

/// Records a frame as a flat list of [`DrawCommand`]s.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
    transform: Affine,
    density: f64,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last built frame, back to front.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn fill(&mut self, path: BezPath, color: Color) {
        self.commands.push(DrawCommand {
            path,
            transform: self.transform,
            paint: Paint::Fill(color),
        });
    }

    fn stroke(&mut self, path: BezPath, style: Stroke, color: Color) {
        self.commands.push(DrawCommand {
            path,
            transform: self.transform,
            paint: Paint::Stroke { style, color },
        });
    }

    /// Render a single path: fill first, then stroke, then point markers.
    /// Paths with fewer than 2 points have no boundary and are skipped.
    pub fn render_path(&mut self, path: &DrawPath) {
        if !path.is_renderable() {
            return;
        }
        let boundary = path.boundary_or_generate().into_owned();
        let appearance = &path.appearance;

        if let Some(fill) = appearance.fill {
            self.fill(boundary.clone(), fill.into());
        }
        if let Some(color) = appearance.stroke {
            let style = stroke_style(appearance, self.density);
            self.stroke(boundary, style, color.into());
        }
        if path.show_points {
            self.render_points(path);
        }
    }

    /// Diamonds at every point in its highlight color, plus handle lines and
    /// dots.
    fn render_points(&mut self, path: &DrawPath) {
        // Markers keep a constant on-screen size.
        let scale = self.density;
        let thin = Stroke::new(1.0 * scale);

        for point in path.points() {
            for handle in [point.left_handle, point.right_handle].into_iter().flatten() {
                if handle == kurbo::Vec2::ZERO {
                    continue;
                }
                let end = point.position + handle;
                let line = Line::new(point.position, end).to_path(0.1);
                self.stroke(line, thin.clone(), HANDLE_COLOR);
                self.fill(circle(end, HANDLE_RADIUS * scale), HANDLE_COLOR);
            }

            let marker = diamond(point.position, MARKER_SIZE * scale);
            self.fill(marker.clone(), point.highlight.into());
            self.stroke(marker, thin.clone(), MARKER_OUTLINE);
        }
    }
}

/// Round caps and joins, with dashes for [`Effect::Dashed`](freepaint_core::appearance::Effect).
pub fn stroke_style(appearance: &Appearance, density_correction: f64) -> Stroke {
    let stroke = Stroke::new(appearance.effective_width(density_correction))
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    match appearance.dash_pattern(density_correction) {
        Some(pattern) => stroke.with_dashes(0.0, pattern),
        None => stroke,
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.commands.clear();
        self.transform = ctx.canvas.camera.transform();
        self.density = ctx.density_correction();

        let document = &ctx.canvas.document;
        let background = self.background_color(ctx);
        self.fill(document.page().to_path(0.1), background);

        for path in &document.paths {
            self.render_path(path);
        }

        if ctx.show_overlays {
            for path in ctx.canvas.overlay_paths() {
                self.render_path(path);
            }
        }
        log::trace!(
            "Built frame: {} commands at zoom {}",
            self.commands.len(),
            ctx.canvas.camera.zoom
        );
    }
}

/// Page rectangle of a frame in screen coordinates.
pub fn page_on_screen(ctx: &RenderContext) -> Rect {
    ctx.canvas.camera.transform().transform_rect_bbox(ctx.canvas.document.page())
}
