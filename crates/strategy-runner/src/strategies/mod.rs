//! Strategy implementations shipped with the runner.

mod ma_cross;

pub use ma_cross::{MaCrossConfig, MaCrossStrategy};
