//! Strategy trait definition.

use std::time::Duration;

use async_trait::async_trait;
use execution_sim::FillReport;
use model::MarketEvent;

use crate::context::StrategyContext;
use crate::error::StrategyError;
use crate::signal::Signal;

/// Core trait for implementing trading strategies.
///
/// Strategies receive market events, fill reports, and timer callbacks,
/// and can respond by generating trading signals.
///
/// # Lifecycle
///
/// 1. `on_start` - called once when the strategy runner starts
/// 2. `on_market_event` - called for each market event the strategy subscribes to
/// 3. `on_order_update` - called when one of the bot's orders fills
/// 4. `on_timer` - called at the configured timer interval (if set)
/// 5. `on_stop` - called once when the strategy runner stops
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Returns the unique identifier for this strategy.
    fn id(&self) -> &str;

    /// Returns the symbols this strategy is interested in.
    ///
    /// If `None`, the strategy receives events for all symbols.
    /// If `Some`, only events for the listed symbols are delivered.
    fn symbols(&self) -> Option<&[String]> {
        None
    }

    /// Returns the timer interval for periodic callbacks.
    ///
    /// If `Some(duration)`, `on_timer` will be called at this interval.
    /// If `None`, no timer callbacks occur.
    fn timer_interval(&self) -> Option<Duration> {
        None
    }

    /// Called once when the strategy runner starts.
    async fn on_start(&mut self, _ctx: &StrategyContext) -> Result<(), StrategyError> {
        Ok(())
    }

    /// Called for each market event.
    ///
    /// This is the primary method for reacting to market data.
    /// Return `Ok(Some(signal))` to generate a trading signal.
    async fn on_market_event(
        &mut self,
        _event: &MarketEvent,
        _ctx: &StrategyContext,
    ) -> Result<Option<Signal>, StrategyError> {
        Ok(None)
    }

    /// Called when one of the bot's orders fills.
    async fn on_order_update(
        &mut self,
        _report: &FillReport,
        _ctx: &StrategyContext,
    ) -> Result<Option<Signal>, StrategyError> {
        Ok(None)
    }

    /// Called at the configured timer interval.
    async fn on_timer(&mut self, _ctx: &StrategyContext) -> Result<Option<Signal>, StrategyError> {
        Ok(None)
    }

    /// Called once when the strategy runner stops.
    async fn on_stop(&mut self, _ctx: &StrategyContext) -> Result<(), StrategyError> {
        Ok(())
    }
}

/// A boxed strategy trait object.
pub type BoxedStrategy = Box<dyn Strategy>;
