//! Path appearance: stroke/fill colors, width and effects.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn red() -> Self {
        Self::rgb(255, 0, 0)
    }

    pub const fn green() -> Self {
        Self::rgb(0, 255, 0)
    }

    /// Hex notation without alpha (`#RRGGBB`).
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_fraction(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Same color with the alpha channel replaced by `fraction` (clamped to `[0, 1]`).
    pub fn with_alpha_fraction(self, fraction: f64) -> Self {
        let a = (fraction.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Parse a CSS color value.
    ///
    /// Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
    /// and a few basic color keywords. Returns `None` for anything else,
    /// including `none`.
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = value.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }
        match lower.as_str() {
            "black" => Some(Self::black()),
            "white" => Some(Self::white()),
            "red" => Some(Self::red()),
            "lime" => Some(Self::green()),
            "green" => Some(Self::rgb(0, 128, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            "gray" | "grey" => Some(Self::rgb(128, 128, 128)),
            "transparent" => Some(Self::new(0, 0, 0, 0)),
            _ => None,
        }
    }
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(SerializableColor::rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(SerializableColor::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(SerializableColor::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<SerializableColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let mut color = SerializableColor::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    if let Some(alpha) = parts.get(3) {
        let alpha: f64 = alpha.parse().ok()?;
        // CSS alpha is a fraction; integer-style alpha (0-255) is also seen in the wild.
        color = if alpha > 1.0 {
            SerializableColor { a: alpha.clamp(0.0, 255.0).round() as u8, ..color }
        } else {
            color.with_alpha_fraction(alpha)
        };
    }
    Some(color)
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Special stroke effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Effect {
    #[default]
    None,
    Dashed,
}

/// Dash pattern (on, off) used by [`Effect::Dashed`], in width units.
pub const DASH_PATTERN: [f64; 2] = [5.0, 15.0];

/// How a path is painted.
///
/// A missing stroke or fill means that component is not painted at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub stroke: Option<SerializableColor>,
    pub fill: Option<SerializableColor>,
    pub stroke_width: f64,
    /// If set, `stroke_width` is measured in device-independent units and scaled
    /// by the renderer's density correction.
    #[serde(default)]
    pub width_is_device_independent: bool,
    #[serde(default)]
    pub effect: Effect,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            stroke: Some(SerializableColor::black()),
            fill: None,
            stroke_width: 5.0,
            width_is_device_independent: false,
            effect: Effect::None,
        }
    }
}

impl Appearance {
    /// Create an appearance with the given stroke and fill and the default width.
    pub fn new(stroke: Option<SerializableColor>, fill: Option<SerializableColor>) -> Self {
        Self {
            stroke,
            fill,
            ..Self::default()
        }
    }

    /// Builder-style stroke width override.
    pub fn with_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Whether neither stroke nor fill is painted.
    pub fn is_invisible(&self) -> bool {
        self.stroke.is_none() && self.fill.is_none()
    }

    /// Stroke width to render with, given the screen density / zoom correction.
    pub fn effective_width(&self, density_correction: f64) -> f64 {
        if self.width_is_device_independent {
            self.stroke_width * density_correction
        } else {
            self.stroke_width
        }
    }

    /// Dash intervals to render with, if the effect asks for any.
    pub fn dash_pattern(&self, density_correction: f64) -> Option<[f64; 2]> {
        match self.effect {
            Effect::None => None,
            Effect::Dashed => {
                let scale = if self.width_is_device_independent {
                    density_correction
                } else {
                    1.0
                };
                Some([DASH_PATTERN[0] * scale, DASH_PATTERN[1] * scale])
            }
        }
    }
}
