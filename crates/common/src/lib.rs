//! Shared startup helpers: logging bootstrap and run-mode selection.

mod logging;
mod mode;

pub use logging::init_logging;
pub use mode::{ParseModeError, RunMode};
