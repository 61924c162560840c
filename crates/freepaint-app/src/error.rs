//! Driver errors.

use freepaint_core::{SettingsError, SvgError};
use thiserror::Error;

/// Errors that can occur while running the driver.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("document error: {0}")]
    Svg(#[from] SvgError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
}
