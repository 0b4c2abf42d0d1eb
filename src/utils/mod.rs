//! Display and logging helpers

pub mod display;
pub mod logging;

pub use display::{Color, ColorOutput, WorldFormatter};
pub use logging::init_logging;
