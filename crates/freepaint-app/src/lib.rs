//! FreePaint headless driver.
//!
//! Replays scripted pointer gestures against a canvas so drawings can be
//! produced and checked without a windowing shell.

mod error;
mod frame;
mod script;

pub use error::AppError;
pub use frame::FrameSummary;
pub use script::{Script, Step, run};
