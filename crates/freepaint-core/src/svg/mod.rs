//! SVG import and export.
//!
//! Only the root `<svg>` element and `<path>` elements are read; everything
//! else in the file is ignored. Output is one `<path>` per renderable path.

mod path_data;

pub use path_data::{ParsedPathData, parse_path_data, write_path_data};

use crate::appearance::{Appearance, Effect, SerializableColor};
use crate::document::Document;
use crate::path::DrawPath;
use ::svg::node::Attributes;
use ::svg::node::element::tag::{self, Type};
use ::svg::parser::Event;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from reading or writing SVG documents.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SVG is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Malformed SVG: {0}")]
    Malformed(String),
}

/// Vendor attribute carrying the background color.
const BACKGROUND_ATTRIBUTE: &str = "viewport-fill";

/// Parse a complete SVG document.
///
/// Fails only when the text has no `<svg>` root. Path elements that cannot
/// be used are skipped with a warning.
pub fn parse_document(content: &str) -> Result<Document, SvgError> {
    let mut document: Option<Document> = None;

    for event in ::svg::read(content)? {
        match event {
            Event::Tag(tag::SVG, Type::Start | Type::Empty, attributes) => {
                if document.is_none() {
                    document = Some(root_document(&attributes));
                }
            }
            Event::Tag(tag::Path, Type::Start | Type::Empty, attributes) => {
                let Some(document) = document.as_mut() else {
                    log::warn!("Path element outside of <svg>; skipping");
                    continue;
                };
                if let Some(path) = path_from_attributes(&attributes) {
                    document.paths.push(path);
                }
            }
            Event::Error(err) => log::warn!("SVG syntax error: {}", err),
            _ => {}
        }
    }

    let document = document.ok_or_else(|| SvgError::Malformed("no <svg> root element".to_string()))?;
    log::debug!(
        "Parsed SVG {}x{} with {} paths",
        document.width,
        document.height,
        document.paths.len()
    );
    Ok(document)
}

/// Read and parse a document from a byte stream.
pub fn read_document(mut reader: impl Read) -> Result<Document, SvgError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let content = String::from_utf8(bytes)?;
    parse_document(&content)
}

/// Open and parse an SVG file.
pub fn open_file(path: impl AsRef<Path>) -> Result<Document, SvgError> {
    read_document(File::open(path)?)
}

/// Build the SVG tree for a document.
pub fn to_svg(document: &Document) -> ::svg::Document {
    let background = document.background.to_hex();
    let mut root = ::svg::Document::new()
        .set("width", format_number(document.width))
        .set("height", format_number(document.height))
        .set(BACKGROUND_ATTRIBUTE, background.as_str())
        .set("style", format!("background-color:{}", background));

    for path in document.paths.iter().filter(|path| path.is_renderable()) {
        root = root.add(path_element(path));
    }
    root
}

/// Serialize a document to SVG text.
pub fn to_svg_string(document: &Document) -> String {
    to_svg(document).to_string()
}

/// Write a document as SVG to a byte stream.
pub fn write_document(document: &Document, writer: impl Write) -> Result<(), SvgError> {
    ::svg::write(writer, &to_svg(document))?;
    Ok(())
}

/// Write a document to an SVG file.
pub fn save_file(document: &Document, path: impl AsRef<Path>) -> Result<(), SvgError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_document(document, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn attribute<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    let value: &'a str = attributes.get(name)?;
    Some(value)
}

fn root_document(attributes: &Attributes) -> Document {
    let mut document = Document::default();
    if let Some(width) = attribute(attributes, "width").and_then(parse_length) {
        document.width = width;
    }
    if let Some(height) = attribute(attributes, "height").and_then(parse_length) {
        document.height = height;
    }

    let background = attribute(attributes, BACKGROUND_ATTRIBUTE).or_else(|| {
        attribute(attributes, "style").and_then(|style| style_property(style, "background-color"))
    });
    if let Some(value) = background {
        match SerializableColor::parse_css(value) {
            Some(color) => document.background = color,
            None => log::warn!("Unrecognized background color {:?}", value),
        }
    }
    document
}

/// Parse a length such as `816`, `816px` or `816.5`.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    match number.parse::<f64>() {
        Ok(length) if length.is_finite() && length > 0.0 => Some(length),
        _ => {
            log::warn!("Unsupported length {:?}; using default", value);
            None
        }
    }
}

/// Look up one property in an inline `style` attribute.
fn style_property<'a>(style: &'a str, name: &str) -> Option<&'a str> {
    style.split(';').find_map(|declaration| {
        let (key, value) = declaration.split_once(':')?;
        (key.trim() == name).then(|| value.trim())
    })
}

fn path_from_attributes(attributes: &Attributes) -> Option<DrawPath> {
    let Some(data) = attribute(attributes, "d") else {
        log::warn!("Path element without path data; skipping");
        return None;
    };
    let parsed = parse_path_data(data);
    if parsed.points.len() < 2 {
        log::warn!("Path data {:?} has fewer than 2 points; skipping", data);
        return None;
    }

    let mut appearance = Appearance::new(
        paint(attributes, "stroke", "stroke-opacity"),
        paint(attributes, "fill", "fill-opacity"),
    );

    if let Some(value) = attribute(attributes, "stroke-width") {
        match value.trim().trim_end_matches("px").parse::<f64>() {
            Ok(width) if width >= 0.0 => appearance.stroke_width = width,
            _ => log::warn!("Malformed stroke-width {:?}; using default", value),
        }
    }
    if attribute(attributes, "stroke-dasharray").is_some_and(|dashes| dashes.trim() != "none") {
        appearance.effect = Effect::Dashed;
    }

    let mut path = DrawPath::from_points(parsed.points, parsed.closed, appearance);
    path.cache_boundary();
    Some(path)
}

/// Read a color attribute and fold its opacity attribute into the alpha channel.
fn paint(attributes: &Attributes, color: &str, opacity: &str) -> Option<SerializableColor> {
    let value = attribute(attributes, color)?.trim();
    if value.eq_ignore_ascii_case("none") {
        return None;
    }
    let Some(mut parsed) = SerializableColor::parse_css(value) else {
        log::warn!("Unrecognized {} color {:?}; treating as none", color, value);
        return None;
    };
    if let Some(value) = attribute(attributes, opacity) {
        match value.trim().parse::<f64>() {
            Ok(alpha) => parsed = parsed.with_alpha_fraction(alpha * parsed.alpha_fraction()),
            Err(_) => log::warn!("Malformed {} {:?}; ignoring", opacity, value),
        }
    }
    Some(parsed)
}

fn path_element(path: &DrawPath) -> ::svg::node::element::Path {
    let appearance = &path.appearance;
    let mut element = ::svg::node::element::Path::new()
        .set("d", write_path_data(path.points(), path.closed))
        .set("stroke-width", format_number(appearance.stroke_width))
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");

    element = match appearance.fill {
        Some(fill) => element
            .set("fill", fill.to_hex())
            .set("fill-opacity", format!("{:.3}", fill.alpha_fraction())),
        None => element.set("fill", "none"),
    };
    element = match appearance.stroke {
        Some(stroke) => element
            .set("stroke", stroke.to_hex())
            .set("stroke-opacity", format!("{:.3}", stroke.alpha_fraction())),
        None => element.set("stroke", "none"),
    };
    if appearance.effect == Effect::Dashed {
        let [on, off] = crate::appearance::DASH_PATTERN;
        element = element.set("stroke-dasharray", format!("{} {}", on, off));
    }
    element
}

/// Shortest decimal text for a number (`816` rather than `816.0`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
