//! Strategy runner - main execution loop.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

use execution_sim::{
    create_position_ledger, FillReport, PaperExecutor, SharedPositionLedger,
};
use metrics::SharedMetrics;
use mock_feed::EventReceiver;
use model::MarketEvent;
use strategy_core::{create_market_state, BoxedStrategy, SharedMarketState, Signal, StrategyContext};

use crate::error::RunnerError;
use crate::signal_processor::{ProcessedSignal, SignalProcessor, SignalProcessorConfig};
use crate::timer::TimerManager;

/// Configuration for the strategy runner.
#[derive(Debug, Clone, Default)]
pub struct StrategyRunnerConfig {
    /// Signal processor configuration.
    pub signal_processor: SignalProcessorConfig,
}

/// The strategy runner orchestrates strategy execution.
///
/// It receives market events, dispatches them to registered strategies,
/// validates generated signals, and fills them against the paper executor,
/// feeding the resulting position changes back to the strategies.
pub struct StrategyRunner {
    /// Registered strategies.
    strategies: Vec<BoxedStrategy>,
    /// Signal processor for validation and rate limiting.
    signal_processor: SignalProcessor,
    /// Timer manager for periodic callbacks.
    timer_manager: TimerManager,
    /// Shared market state.
    market_state: SharedMarketState,
    /// Position ledger updated from simulated fills.
    positions: SharedPositionLedger,
    /// Optional pipeline metrics.
    metrics: Option<SharedMetrics>,
}

impl StrategyRunner {
    /// Create a new strategy runner with the given configuration.
    pub fn new(config: StrategyRunnerConfig) -> Self {
        Self {
            signal_processor: SignalProcessor::new(config.signal_processor),
            strategies: Vec::new(),
            timer_manager: TimerManager::new(),
            market_state: create_market_state(),
            positions: create_position_ledger(),
            metrics: None,
        }
    }

    /// Attach pipeline metrics.
    pub fn with_metrics(mut self, metrics: SharedMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Use an externally owned position ledger.
    pub fn with_position_ledger(mut self, ledger: SharedPositionLedger) -> Self {
        self.positions = ledger;
        self
    }

    /// Register a strategy with the runner.
    pub fn register_strategy(&mut self, strategy: BoxedStrategy) {
        let strategy_id = strategy.id().to_string();

        if let Some(interval) = strategy.timer_interval() {
            self.timer_manager.register(&strategy_id, interval);
            info!(
                strategy_id = %strategy_id,
                interval_ms = %interval.as_millis(),
                "registered strategy timer"
            );
        }

        info!(strategy_id = %strategy_id, "registered strategy");
        self.strategies.push(strategy);
    }

    /// Get a reference to the shared market state.
    pub fn market_state(&self) -> &SharedMarketState {
        &self.market_state
    }

    /// Get a reference to the shared position ledger.
    pub fn positions(&self) -> &SharedPositionLedger {
        &self.positions
    }

    /// Run the strategy loop.
    ///
    /// This method runs until shutdown is signaled or the market channel
    /// closes.
    pub async fn run(
        mut self,
        mut market_rx: EventReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), RunnerError> {
        info!(
            strategy_count = self.strategies.len(),
            "starting strategy runner"
        );

        self.start_strategies().await?;

        // Granularity for checking strategy timers
        let timer_interval = Duration::from_millis(100);

        loop {
            tokio::select! {
                biased;

                // Shutdown signal (highest priority); a dropped sender
                // counts as shutdown, otherwise changed() errors forever
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("shutdown signal received");
                        break;
                    }
                }

                // Timer tick
                _ = tokio::time::sleep(timer_interval), if !self.timer_manager.is_empty() => {
                    self.handle_timers().await?;
                }

                // Market events
                maybe_event = market_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_market_event(event).await?,
                        None => {
                            warn!("market channel closed");
                            break;
                        }
                    }
                }
            }
        }

        self.stop_strategies().await?;

        info!("strategy runner stopped");
        Ok(())
    }

    /// Call on_start for all strategies.
    async fn start_strategies(&mut self) -> Result<(), RunnerError> {
        let ctx = self.make_context();

        for strategy in &mut self.strategies {
            let strategy_id = strategy.id().to_string();
            if let Err(e) = strategy.on_start(&ctx).await {
                error!(strategy_id = %strategy_id, error = %e, "strategy start failed");
                return Err(e.into());
            }
            debug!(strategy_id = %strategy_id, "strategy started");
        }

        Ok(())
    }

    /// Call on_stop for all strategies.
    async fn stop_strategies(&mut self) -> Result<(), RunnerError> {
        let ctx = self.make_context();

        for strategy in &mut self.strategies {
            let strategy_id = strategy.id().to_string();
            if let Err(e) = strategy.on_stop(&ctx).await {
                error!(strategy_id = %strategy_id, error = %e, "strategy stop failed");
                // Continue stopping other strategies
            } else {
                debug!(strategy_id = %strategy_id, "strategy stopped");
            }
        }

        Ok(())
    }

    /// Handle a market event.
    async fn handle_market_event(&mut self, event: MarketEvent) -> Result<(), RunnerError> {
        if let MarketEvent::Tick(ref tick) = event {
            if tick.price <= Decimal::ZERO {
                warn!(
                    symbol = %tick.symbol,
                    price = %tick.price,
                    "discarding non-positive tick"
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.inc_invalid_ticks();
                }
                return Ok(());
            }
            trace!(
                id = tick.tick_id,
                symbol = %tick.symbol,
                price = %tick.price,
                "tick"
            );
            self.market_state
                .update_last_price(&tick.symbol, tick.price);
        }

        if let Some(ref metrics) = self.metrics {
            metrics.inc_events_dispatched();
        }

        let ctx = self.make_context();

        // Collect signals first to avoid borrow issues
        let mut signals = Vec::new();

        for strategy in &mut self.strategies {
            if let Some(symbols) = strategy.symbols() {
                let event_symbol = event.symbol();
                if !symbols.iter().any(|s| s == event_symbol) {
                    continue;
                }
            }

            match strategy.on_market_event(&event, &ctx).await {
                Ok(Some(signal)) => {
                    signals.push(signal);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        strategy_id = %strategy.id(),
                        error = %e,
                        "strategy error on market event"
                    );
                }
            }
        }

        self.process_signals(signals).await;

        Ok(())
    }

    /// Handle timer callbacks.
    async fn handle_timers(&mut self) -> Result<(), RunnerError> {
        let due_strategies = self.timer_manager.check_due();

        if due_strategies.is_empty() {
            return Ok(());
        }

        let ctx = self.make_context();

        let mut signals = Vec::new();

        for strategy_id in due_strategies {
            for strategy in &mut self.strategies {
                if strategy.id() == strategy_id {
                    match strategy.on_timer(&ctx).await {
                        Ok(Some(signal)) => {
                            signals.push(signal);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(
                                strategy_id = %strategy_id,
                                error = %e,
                                "strategy error on timer"
                            );
                        }
                    }
                    break;
                }
            }
        }

        self.process_signals(signals).await;

        Ok(())
    }

    /// Process a batch of signals, including any produced by fill callbacks.
    ///
    /// The queue is bounded to avoid a strategy that signals on every fill
    /// spinning the loop forever.
    async fn process_signals(&mut self, signals: Vec<Signal>) {
        const MAX_CASCADE: usize = 16;

        let mut queue: VecDeque<Signal> = signals.into();
        let mut processed_count = 0;

        while let Some(signal) = queue.pop_front() {
            if processed_count >= MAX_CASCADE {
                warn!(dropped = queue.len() + 1, "signal cascade limit reached");
                break;
            }
            processed_count += 1;

            let cascaded = self.process_signal(signal).await;
            queue.extend(cascaded);
        }
    }

    /// Process a single signal; returns any signals strategies generated in
    /// response to the resulting fill.
    async fn process_signal(&mut self, signal: Signal) -> Vec<Signal> {
        let market_price = self.market_state.last_price(&signal.intent.symbol);

        let processed = match self.signal_processor.process(signal, market_price) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "signal rejected by processor");
                if let Some(ref metrics) = self.metrics {
                    metrics.inc_signals_rejected();
                }
                return Vec::new();
            }
        };

        if let Some(ref metrics) = self.metrics {
            metrics.inc_signals_generated();
        }

        match self.execute_signal_paper(processed) {
            Some(report) => self.dispatch_fill(report).await,
            None => Vec::new(),
        }
    }

    /// Fill a processed signal against the paper executor.
    fn execute_signal_paper(&mut self, processed: ProcessedSignal) -> Option<FillReport> {
        let intent = &processed.signal.intent;

        // Limit orders fill at their limit price, market orders at the last
        // observed market price.
        let exec_price = match intent.price {
            Some(price) => price,
            None => match self.market_state.last_price(&intent.symbol) {
                Some(price) => price,
                None => {
                    warn!(
                        symbol = %intent.symbol,
                        "no market price yet, dropping market order"
                    );
                    return None;
                }
            },
        };

        let report = PaperExecutor::simulate_fill(
            &intent.symbol,
            intent.side,
            intent.order_type,
            intent.quantity,
            exec_price,
            &processed.client_order_id,
            timestamp_ms(),
        );

        self.positions.apply_fill(&report);

        if let Some(ref metrics) = self.metrics {
            metrics.inc_paper_fills();
        }

        info!(
            strategy_id = %processed.signal.strategy_id,
            client_order_id = %report.client_order_id,
            symbol = %report.symbol,
            side = ?report.side,
            quantity = %report.quantity,
            fill_price = %report.fill_price,
            reason = ?processed.signal.reason,
            "[PAPER] order filled"
        );

        Some(report)
    }

    /// Notify strategies of a fill; collect any signals they respond with.
    async fn dispatch_fill(&mut self, report: FillReport) -> Vec<Signal> {
        let ctx = self.make_context();
        let mut signals = Vec::new();

        for strategy in &mut self.strategies {
            match strategy.on_order_update(&report, &ctx).await {
                Ok(Some(signal)) => {
                    signals.push(signal);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        strategy_id = %strategy.id(),
                        error = %e,
                        "strategy error on order update"
                    );
                }
            }
        }

        signals
    }

    /// Create a strategy context for the current moment.
    fn make_context(&self) -> StrategyContext {
        StrategyContext::new(
            timestamp_ms(),
            Arc::clone(&self.market_state),
            Arc::clone(&self.positions),
        )
    }
}

/// Get current timestamp in milliseconds.
fn timestamp_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
