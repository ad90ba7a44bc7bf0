//! Moving-average crossover strategy.
//!
//! Thin adapter between the event-driven runner and the pure
//! [`CrossoverEvaluator`]: each tick is forwarded to `observe`, then the
//! current position is read from the context and passed to `evaluate`. The
//! evaluator owns the price window; the position stays owned by the
//! execution layer.

use async_trait::async_trait;
use crossover::{AverageKind, CrossoverEvaluator, Signal as CrossSignal};
use rust_decimal::Decimal;
use tracing::{info, warn};

use model::MarketEvent;
use strategy_core::{OrderIntent, Signal, Strategy, StrategyContext, StrategyError};

/// Configuration for the crossover strategy.
#[derive(Debug, Clone)]
pub struct MaCrossConfig {
    /// Trading pair symbol (e.g., "BTCUSDT").
    pub symbol: String,
    /// Moving-average formula for both windows.
    pub kind: AverageKind,
    /// Fast lookback period.
    pub fast_period: usize,
    /// Slow lookback period; must exceed the fast period.
    pub slow_period: usize,
    /// Quantity to trade per signal.
    pub quantity: Decimal,
}

/// A two-moving-average crossover strategy.
///
/// Buys when the fast average is above the slow average and the position
/// is not already long; sells on the opposite ordering unless already
/// short. Ties and the warmup window generate nothing.
pub struct MaCrossStrategy {
    id: String,
    config: MaCrossConfig,
    symbols: Vec<String>,
    evaluator: CrossoverEvaluator,
}

impl MaCrossStrategy {
    /// Create a new crossover strategy.
    ///
    /// Fails with `StrategyError::InvalidConfig` when the period pair is
    /// rejected by the evaluator.
    pub fn new(id: impl Into<String>, config: MaCrossConfig) -> Result<Self, StrategyError> {
        let evaluator = CrossoverEvaluator::new(config.kind, config.fast_period, config.slow_period)?;
        let symbols = vec![config.symbol.clone()];
        Ok(Self {
            id: id.into(),
            config,
            symbols,
            evaluator,
        })
    }
}

#[async_trait]
impl Strategy for MaCrossStrategy {
    fn id(&self) -> &str {
        &self.id
    }

    fn symbols(&self) -> Option<&[String]> {
        Some(&self.symbols)
    }

    async fn on_start(&mut self, _ctx: &StrategyContext) -> Result<(), StrategyError> {
        info!(
            strategy_id = %self.id,
            symbol = %self.config.symbol,
            kind = ?self.config.kind,
            fast_period = self.config.fast_period,
            slow_period = self.config.slow_period,
            quantity = %self.config.quantity,
            "crossover strategy started"
        );
        Ok(())
    }

    async fn on_market_event(
        &mut self,
        event: &MarketEvent,
        ctx: &StrategyContext,
    ) -> Result<Option<Signal>, StrategyError> {
        let MarketEvent::Tick(tick) = event;

        if tick.symbol != self.config.symbol {
            return Ok(None);
        }

        // A bad tick is discarded; evaluator state is untouched
        if let Err(e) = self.evaluator.observe(tick.price) {
            warn!(
                strategy_id = %self.id,
                tick_id = tick.tick_id,
                error = %e,
                "discarding invalid tick"
            );
            return Ok(None);
        }

        let position = ctx.position(&self.config.symbol);
        let Some(direction) = self.evaluator.evaluate(position) else {
            return Ok(None);
        };

        let (Some(fast), Some(slow)) = (self.evaluator.fast_value(), self.evaluator.slow_value())
        else {
            return Ok(None);
        };

        let intent = match direction {
            CrossSignal::Buy => OrderIntent::market_buy(&self.config.symbol, self.config.quantity),
            CrossSignal::Sell => {
                OrderIntent::market_sell(&self.config.symbol, self.config.quantity)
            }
        };

        Ok(Some(Signal::with_reason(
            &self.id,
            intent,
            format!("fast {} vs slow {} with position {:?}", fast, slow, position),
        )))
    }

    async fn on_stop(&mut self, ctx: &StrategyContext) -> Result<(), StrategyError> {
        info!(
            strategy_id = %self.id,
            position = ?ctx.position(&self.config.symbol),
            "crossover strategy stopped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use execution_sim::{
        create_position_ledger, OrderSide, OrderType, PaperExecutor, SharedPositionLedger,
    };
    use model::Tick;
    use rust_decimal_macros::dec;
    use strategy_core::create_market_state;

    fn make_strategy(kind: AverageKind) -> MaCrossStrategy {
        MaCrossStrategy::new(
            "test",
            MaCrossConfig {
                symbol: "BTCUSDT".to_string(),
                kind,
                fast_period: 2,
                slow_period: 3,
                quantity: dec!(0.1),
            },
        )
        .unwrap()
    }

    fn make_tick(price: Decimal, tick_id: u64) -> MarketEvent {
        MarketEvent::Tick(Tick {
            symbol: "BTCUSDT".to_string(),
            price,
            timestamp_ms: 1000,
            tick_id,
        })
    }

    fn make_context(ledger: &SharedPositionLedger) -> StrategyContext {
        StrategyContext::new(1000, create_market_state(), SharedPositionLedger::clone(ledger))
    }

    fn go_long(ledger: &SharedPositionLedger, qty: Decimal) {
        ledger.apply_fill(&PaperExecutor::simulate_fill(
            "BTCUSDT",
            OrderSide::Buy,
            OrderType::Market,
            qty,
            dec!(100),
            "fill",
            1000,
        ));
    }

    #[test]
    fn test_invalid_periods_rejected() {
        let result = MaCrossStrategy::new(
            "bad",
            MaCrossConfig {
                symbol: "BTCUSDT".to_string(),
                kind: AverageKind::Simple,
                fast_period: 5,
                slow_period: 5,
                quantity: dec!(1),
            },
        );
        assert!(matches!(result, Err(StrategyError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_quiet_during_warmup() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        let ctx = make_context(&ledger);

        for (i, price) in [dec!(5), dec!(6)].into_iter().enumerate() {
            let signal = strategy
                .on_market_event(&make_tick(price, i as u64), &ctx)
                .await
                .unwrap();
            assert!(signal.is_none());
        }
    }

    #[tokio::test]
    async fn test_buy_on_upward_cross_when_flat() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        let ctx = make_context(&ledger);

        for (i, price) in [dec!(5), dec!(6)].into_iter().enumerate() {
            strategy
                .on_market_event(&make_tick(price, i as u64), &ctx)
                .await
                .unwrap();
        }

        let signal = strategy
            .on_market_event(&make_tick(dec!(7), 3), &ctx)
            .await
            .unwrap()
            .expect("expected buy signal");

        assert_eq!(signal.intent.side, OrderSide::Buy);
        assert_eq!(signal.intent.order_type, OrderType::Market);
        assert_eq!(signal.intent.quantity, dec!(0.1));
    }

    #[tokio::test]
    async fn test_no_rebuy_while_long() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        go_long(&ledger, dec!(0.1));
        let ctx = make_context(&ledger);

        for (i, price) in [dec!(5), dec!(6), dec!(7), dec!(8)].into_iter().enumerate() {
            let signal = strategy
                .on_market_event(&make_tick(price, i as u64), &ctx)
                .await
                .unwrap();
            assert!(signal.is_none(), "long position must suppress buys");
        }
    }

    #[tokio::test]
    async fn test_sell_on_downward_cross_while_long() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        go_long(&ledger, dec!(0.1));
        let ctx = make_context(&ledger);

        for (i, price) in [dec!(8), dec!(7)].into_iter().enumerate() {
            strategy
                .on_market_event(&make_tick(price, i as u64), &ctx)
                .await
                .unwrap();
        }

        let signal = strategy
            .on_market_event(&make_tick(dec!(6), 3), &ctx)
            .await
            .unwrap()
            .expect("expected sell signal");

        assert_eq!(signal.intent.side, OrderSide::Sell);
    }

    #[tokio::test]
    async fn test_invalid_tick_is_discarded() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        let ctx = make_context(&ledger);

        strategy
            .on_market_event(&make_tick(dec!(5), 1), &ctx)
            .await
            .unwrap();
        strategy
            .on_market_event(&make_tick(dec!(6), 2), &ctx)
            .await
            .unwrap();

        // Non-positive price: no signal, no state change
        let signal = strategy
            .on_market_event(&make_tick(dec!(0), 3), &ctx)
            .await
            .unwrap();
        assert!(signal.is_none());

        // Next good tick completes warmup as if the bad one never arrived
        let signal = strategy
            .on_market_event(&make_tick(dec!(7), 4), &ctx)
            .await
            .unwrap();
        assert!(signal.is_some());
    }

    #[tokio::test]
    async fn test_other_symbol_ignored() {
        let mut strategy = make_strategy(AverageKind::Simple);
        let ledger = create_position_ledger();
        let ctx = make_context(&ledger);

        let event = MarketEvent::Tick(Tick {
            symbol: "ETHUSDT".to_string(),
            price: dec!(3000),
            timestamp_ms: 1000,
            tick_id: 1,
        });

        let signal = strategy.on_market_event(&event, &ctx).await.unwrap();
        assert!(signal.is_none());
        assert_eq!(strategy.evaluator.observed_len(), 0);
    }

    #[tokio::test]
    async fn test_ema_variant_crosses() {
        let mut strategy = make_strategy(AverageKind::Exponential);
        let ledger = create_position_ledger();
        let ctx = make_context(&ledger);

        let mut last = None;
        for (i, price) in [dec!(10), dec!(11), dec!(12), dec!(14)]
            .into_iter()
            .enumerate()
        {
            last = strategy
                .on_market_event(&make_tick(price, i as u64), &ctx)
                .await
                .unwrap();
        }

        let signal = last.expect("rising prices should cross the EMAs upward");
        assert_eq!(signal.intent.side, OrderSide::Buy);
    }
}
