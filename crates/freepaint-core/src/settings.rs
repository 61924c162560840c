//! User-adjustable drawing settings, loaded from JSON.

use crate::appearance::{Appearance, Effect, SerializableColor};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Drawing settings. Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stroke_color: Option<SerializableColor>,
    pub fill_color: Option<SerializableColor>,
    pub stroke_width: f64,
    pub width_is_device_independent: bool,
    pub effect: Effect,
    /// RDP epsilon applied to freehand strokes.
    pub simplification_epsilon: f64,
    pub document_width: f64,
    pub document_height: f64,
    pub background: SerializableColor,
    /// Number of undo snapshots kept.
    pub history_capacity: usize,
    /// Standard deviation of spray dot offsets.
    pub spray_radius: f64,
    /// Dots added per spray event.
    pub spray_density: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stroke_color: Some(SerializableColor::black()),
            fill_color: None,
            stroke_width: 5.0,
            width_is_device_independent: false,
            effect: Effect::None,
            simplification_epsilon: 1.0,
            document_width: 816.0,
            document_height: 1056.0,
            background: SerializableColor::white(),
            history_capacity: 256,
            spray_radius: 15.0,
            spray_density: 50,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Appearance for newly drawn paths.
    pub fn appearance(&self) -> Appearance {
        Appearance {
            stroke: self.stroke_color,
            fill: self.fill_color,
            stroke_width: self.stroke_width,
            width_is_device_independent: self.width_is_device_independent,
            effect: self.effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"stroke_width": 2.5, "effect": "Dashed"}"#).unwrap();
        assert_eq!(settings.stroke_width, 2.5);
        assert_eq!(settings.effect, Effect::Dashed);
        assert_eq!(settings.history_capacity, 256);
        assert_eq!(settings.stroke_color, Some(SerializableColor::black()));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.fill_color = Some(SerializableColor::red());
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load(dir.path().join("missing.json")),
            Err(SettingsError::Io(_))
        ));

        let file = dir.path().join("bad.json");
        std::fs::write(&file, "{ not json").unwrap();
        assert!(matches!(Settings::load(&file), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_appearance() {
        let settings = Settings {
            stroke_width: 3.0,
            width_is_device_independent: true,
            ..Settings::default()
        };
        let appearance = settings.appearance();
        assert_eq!(appearance.stroke_width, 3.0);
        assert!(appearance.width_is_device_independent);
        assert_eq!(appearance.fill, None);
    }
}
