//! FreePaint rendering.
//!
//! Turns a [`freepaint_core::canvas::Canvas`] into backend-neutral draw
//! commands.

mod display_list;
mod renderer;

pub use display_list::{DisplayListRenderer, DrawCommand, Paint, page_on_screen, stroke_style};
pub use renderer::{RenderContext, Renderer};
