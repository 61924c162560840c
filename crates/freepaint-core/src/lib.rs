//! FreePaint Core Library
//!
//! The vector path engine behind FreePaint: paths of points with relative
//! Bézier handles, curve synthesis from raw samples, region erasing, SVG
//! import/export and snapshot-based undo.

pub mod appearance;
pub mod boolean;
pub mod camera;
pub mod canvas;
pub mod curve;
pub mod document;
pub mod erase;
pub mod geometry;
pub mod history;
pub mod input;
pub mod path;
pub mod point;
pub mod settings;
pub mod svg;
pub mod tools;

pub use appearance::{Appearance, Effect, SerializableColor};
pub use camera::Camera;
pub use canvas::Canvas;
pub use document::Document;
pub use history::History;
pub use input::PointerEvent;
pub use path::{DrawPath, PathId};
pub use point::{Command, PathPoint};
pub use settings::{Settings, SettingsError};
pub use svg::SvgError;
pub use tools::{Tool, ToolKind};
