//! Moving average variants.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which moving-average formula to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AverageKind {
    /// Trailing arithmetic mean over the lookback window.
    Simple,
    /// Exponentially weighted average with smoothing `2 / (period + 1)`,
    /// seeded with the simple mean of the first full window.
    Exponential,
}

/// A single moving average over a trailing price window.
///
/// The value is `None` until the window holds at least `period` samples.
/// Both variants are recomputed from the shared window by [`update`];
/// the exponential variant additionally carries its previous value.
///
/// [`update`]: MovingAverage::update
#[derive(Debug, Clone)]
pub struct MovingAverage {
    kind: AverageKind,
    period: usize,
    alpha: Decimal,
    value: Option<Decimal>,
}

impl MovingAverage {
    /// Create a moving average with the given kind and lookback period.
    ///
    /// Period validation is the owning evaluator's responsibility.
    pub fn new(kind: AverageKind, period: usize) -> Self {
        // alpha = 2 / (period + 1); unused by the simple variant.
        let alpha = Decimal::from(2) / Decimal::from(period + 1);
        Self {
            kind,
            period,
            alpha,
            value: None,
        }
    }

    /// The lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// The average kind.
    pub fn kind(&self) -> AverageKind {
        self.kind
    }

    /// Current value, `None` while the window is shorter than the period.
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Recompute from the shared price window after a new observation.
    ///
    /// The window is ordered oldest to newest and must already contain the
    /// latest price. A no-op while fewer than `period` samples exist.
    pub fn update(&mut self, window: &VecDeque<Decimal>) {
        if window.len() < self.period {
            return;
        }
        let Some(&latest) = window.back() else {
            return;
        };

        self.value = Some(match (self.kind, self.value) {
            (AverageKind::Simple, _) => trailing_mean(window, self.period),
            // First computable EMA value is seeded as the simple mean.
            (AverageKind::Exponential, None) => trailing_mean(window, self.period),
            (AverageKind::Exponential, Some(prev)) => {
                self.alpha * latest + (Decimal::ONE - self.alpha) * prev
            }
        });
    }
}

/// Arithmetic mean of the most recent `period` samples.
fn trailing_mean(window: &VecDeque<Decimal>, period: usize) -> Decimal {
    let sum: Decimal = window.iter().rev().take(period).sum();
    sum / Decimal::from(period)
}
