//! Two-moving-average crossover signal evaluation.
//!
//! This crate provides the core signal logic for the bot:
//!
//! - **CrossoverEvaluator**: feeds a bounded price window into a fast and a
//!   slow moving average and turns their relative ordering into buy/sell
//!   intents, guarded by the caller's current position
//! - **MovingAverage**: simple (trailing mean) or exponential
//!   (`alpha = 2 / (period + 1)`, seeded with the simple mean) variants
//! - **PositionState / Signal**: the evaluator's input and output vocabulary
//!
//! The evaluator is a plain synchronous value type with no interior
//! locking. Callers that share one instance across tasks must serialize
//! access themselves.
//!
//! # Example
//!
//! ```rust
//! use crossover::{AverageKind, CrossoverEvaluator, PositionState, Signal};
//! use rust_decimal::Decimal;
//!
//! let mut eval = CrossoverEvaluator::new(AverageKind::Simple, 2, 3).unwrap();
//! for price in [5u32, 6, 7] {
//!     eval.observe(Decimal::from(price)).unwrap();
//! }
//! // Fast (2-period) mean is above slow (3-period) mean and we are flat.
//! assert_eq!(eval.evaluate(PositionState::Flat), Some(Signal::Buy));
//! // A long position suppresses further buys.
//! assert_eq!(eval.evaluate(PositionState::Long), None);
//! ```

mod average;
mod error;
mod evaluator;

pub use average::{AverageKind, MovingAverage};
pub use error::EvaluatorError;
pub use evaluator::{CrossoverEvaluator, PositionState, Signal};
