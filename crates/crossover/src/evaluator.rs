//! Crossover signal evaluator.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::average::{AverageKind, MovingAverage};
use crate::error::EvaluatorError;

/// The caller's current holding direction for an instrument.
///
/// Owned by an external position tracker and passed in per
/// [`evaluate`](CrossoverEvaluator::evaluate) call; the evaluator never
/// stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Flat,
    Long,
    Short,
}

/// Directional trading intent emitted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
}

/// Converts a stream of price observations into discrete buy/sell intents
/// via a two-moving-average comparison.
///
/// Prices enter through [`observe`]; [`evaluate`] compares the fast and slow
/// averages against the caller-supplied position. The retained window is
/// bounded to the slow period, so memory is constant regardless of how many
/// ticks are observed.
///
/// [`observe`]: CrossoverEvaluator::observe
/// [`evaluate`]: CrossoverEvaluator::evaluate
#[derive(Debug, Clone)]
pub struct CrossoverEvaluator {
    window: VecDeque<Decimal>,
    fast: MovingAverage,
    slow: MovingAverage,
}

impl CrossoverEvaluator {
    /// Create an evaluator for the given average kind and lookback pair.
    ///
    /// Requires `1 <= fast_period < slow_period`.
    pub fn new(
        kind: AverageKind,
        fast_period: usize,
        slow_period: usize,
    ) -> Result<Self, EvaluatorError> {
        if fast_period < 1 || fast_period >= slow_period {
            return Err(EvaluatorError::InvalidPeriods {
                fast: fast_period,
                slow: slow_period,
            });
        }
        Ok(Self {
            window: VecDeque::with_capacity(slow_period + 1),
            fast: MovingAverage::new(kind, fast_period),
            slow: MovingAverage::new(kind, slow_period),
        })
    }

    /// Append a price observation and recompute both averages.
    ///
    /// Rejects non-positive prices with [`EvaluatorError::InvalidPrice`]
    /// without touching the retained window. Only the most recent
    /// `slow_period` samples are kept.
    pub fn observe(&mut self, price: Decimal) -> Result<(), EvaluatorError> {
        if price <= Decimal::ZERO {
            return Err(EvaluatorError::InvalidPrice(price));
        }

        self.window.push_back(price);
        if self.window.len() > self.slow.period() {
            self.window.pop_front();
        }

        self.fast.update(&self.window);
        self.slow.update(&self.window);
        Ok(())
    }

    /// Compare the two averages under the supplied position.
    ///
    /// Returns `None` while either average is still undefined, on an exact
    /// tie, or when the position already matches the implied direction
    /// (a `Long` position suppresses `Buy`, a `Short` position suppresses
    /// `Sell`). Pure: no internal state changes.
    pub fn evaluate(&self, position: PositionState) -> Option<Signal> {
        let fast = self.fast.value()?;
        let slow = self.slow.value()?;

        if fast > slow && position != PositionState::Long {
            Some(Signal::Buy)
        } else if fast < slow && position != PositionState::Short {
            Some(Signal::Sell)
        } else {
            None
        }
    }

    /// Current fast average, if computable.
    pub fn fast_value(&self) -> Option<Decimal> {
        self.fast.value()
    }

    /// Current slow average, if computable.
    pub fn slow_value(&self) -> Option<Decimal> {
        self.slow.value()
    }

    /// Whether both averages are computable.
    pub fn is_ready(&self) -> bool {
        self.fast.value().is_some() && self.slow.value().is_some()
    }

    /// Number of retained observations.
    pub fn observed_len(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sma_evaluator(fast: usize, slow: usize) -> CrossoverEvaluator {
        CrossoverEvaluator::new(AverageKind::Simple, fast, slow).unwrap()
    }

    #[test]
    fn test_rejects_bad_periods() {
        assert!(matches!(
            CrossoverEvaluator::new(AverageKind::Simple, 0, 5),
            Err(EvaluatorError::InvalidPeriods { .. })
        ));
        assert!(matches!(
            CrossoverEvaluator::new(AverageKind::Simple, 5, 5),
            Err(EvaluatorError::InvalidPeriods { .. })
        ));
        assert!(matches!(
            CrossoverEvaluator::new(AverageKind::Exponential, 20, 10),
            Err(EvaluatorError::InvalidPeriods { .. })
        ));
    }

    #[test]
    fn test_no_signal_during_warmup() {
        // No signal for the first slow_period - 1 observations, regardless
        // of input values.
        let mut eval = sma_evaluator(2, 5);
        for price in [dec!(100), dec!(1), dec!(500), dec!(7)] {
            eval.observe(price).unwrap();
            assert_eq!(eval.evaluate(PositionState::Flat), None);
            assert_eq!(eval.evaluate(PositionState::Long), None);
            assert_eq!(eval.evaluate(PositionState::Short), None);
        }
        assert!(!eval.is_ready());

        eval.observe(dec!(8)).unwrap();
        assert!(eval.is_ready());
    }

    #[test]
    fn test_fast_sma_trailing_value() {
        let mut eval = sma_evaluator(2, 5);
        for price in [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)] {
            eval.observe(price).unwrap();
        }
        assert_eq!(eval.fast_value(), Some(dec!(4.5)));
        assert_eq!(eval.slow_value(), Some(dec!(3)));
    }

    #[test]
    fn test_ema_seed_and_step() {
        let mut eval = CrossoverEvaluator::new(AverageKind::Exponential, 3, 4).unwrap();
        for price in [dec!(10), dec!(20), dec!(30)] {
            eval.observe(price).unwrap();
        }
        // Seed at third observation: (10 + 20 + 30) / 3.
        assert_eq!(eval.fast_value(), Some(dec!(20)));

        eval.observe(dec!(40)).unwrap();
        // alpha = 0.5: 0.5 * 40 + 0.5 * 20.
        assert_eq!(eval.fast_value(), Some(dec!(30)));
    }

    #[test]
    fn test_tie_never_signals() {
        // Constant prices keep both averages exactly equal.
        let mut eval = sma_evaluator(2, 3);
        for _ in 0..5 {
            eval.observe(dec!(100)).unwrap();
        }
        assert_eq!(eval.fast_value(), eval.slow_value());
        assert_eq!(eval.evaluate(PositionState::Flat), None);
        assert_eq!(eval.evaluate(PositionState::Long), None);
        assert_eq!(eval.evaluate(PositionState::Short), None);
    }

    #[test]
    fn test_position_guard_is_idempotent() {
        let mut eval = sma_evaluator(2, 3);
        for price in [dec!(5), dec!(6), dec!(7)] {
            eval.observe(price).unwrap();
        }
        assert!(eval.fast_value() > eval.slow_value());

        // Already long: repeated evaluation never re-signals.
        for _ in 0..3 {
            assert_eq!(eval.evaluate(PositionState::Long), None);
        }
        // Flat (or short) under the same averages still buys.
        assert_eq!(eval.evaluate(PositionState::Flat), Some(Signal::Buy));
        assert_eq!(eval.evaluate(PositionState::Short), Some(Signal::Buy));
    }

    #[test]
    fn test_sell_guard() {
        let mut eval = sma_evaluator(2, 3);
        for price in [dec!(8), dec!(7), dec!(6)] {
            eval.observe(price).unwrap();
        }
        assert!(eval.fast_value() < eval.slow_value());

        assert_eq!(eval.evaluate(PositionState::Flat), Some(Signal::Sell));
        assert_eq!(eval.evaluate(PositionState::Long), Some(Signal::Sell));
        assert_eq!(eval.evaluate(PositionState::Short), None);
    }

    #[test]
    fn test_invalid_price_leaves_state_unchanged() {
        let mut eval = sma_evaluator(2, 3);
        eval.observe(dec!(5)).unwrap();
        eval.observe(dec!(6)).unwrap();

        assert!(matches!(
            eval.observe(dec!(0)),
            Err(EvaluatorError::InvalidPrice(_))
        ));
        assert!(matches!(
            eval.observe(dec!(-3)),
            Err(EvaluatorError::InvalidPrice(_))
        ));
        assert_eq!(eval.observed_len(), 2);
        assert_eq!(eval.evaluate(PositionState::Flat), None);

        // The next valid observation completes warmup exactly as if the
        // rejected ticks never happened.
        eval.observe(dec!(7)).unwrap();
        assert_eq!(eval.fast_value(), Some(dec!(6.5)));
        assert_eq!(eval.slow_value(), Some(dec!(6)));
        assert_eq!(eval.evaluate(PositionState::Flat), Some(Signal::Buy));
    }

    #[test]
    fn test_rising_price_scenario() {
        // Periods (2, 3), prices 5, 6, 7, 8: first two observations are
        // warmup, the third crosses fast above slow. After the caller acts
        // on the buy and goes long, the fourth bar stays quiet.
        let mut eval = sma_evaluator(2, 3);
        let mut position = PositionState::Flat;
        let mut signals = Vec::new();

        for price in [dec!(5), dec!(6), dec!(7), dec!(8)] {
            eval.observe(price).unwrap();
            let signal = eval.evaluate(position);
            if signal == Some(Signal::Buy) {
                position = PositionState::Long;
            }
            signals.push(signal);
        }

        assert_eq!(signals, vec![None, None, Some(Signal::Buy), None]);
    }

    #[test]
    fn test_window_stays_bounded() {
        let mut eval = sma_evaluator(3, 10);
        for i in 1..=100 {
            eval.observe(Decimal::from(i)).unwrap();
        }
        assert_eq!(eval.observed_len(), 10);
        // Fast mean over the last three of 98, 99, 100.
        assert_eq!(eval.fast_value(), Some(dec!(99)));
    }
}
