//! Evaluator error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the crossover evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    /// Invalid period configuration, rejected at construction.
    #[error("invalid periods: fast {fast} must be >= 1 and less than slow {slow}")]
    InvalidPeriods {
        /// Requested fast lookback.
        fast: usize,
        /// Requested slow lookback.
        slow: usize,
    },

    /// Non-positive price passed to `observe`. The retained window is left
    /// unchanged; the caller can discard the tick and continue.
    #[error("invalid price {0}: must be a finite positive number")]
    InvalidPrice(Decimal),
}
