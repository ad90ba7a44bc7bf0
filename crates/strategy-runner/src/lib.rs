//! Strategy execution runtime for the trading bot.
//!
//! This crate provides the runtime for executing trading strategies:
//!
//! - **StrategyRunner**: main loop that dispatches events to strategies
//! - **SignalProcessor**: validates signals and enforces rate limits
//! - **TimerManager**: manages periodic callbacks for strategies
//! - **strategies**: the moving-average crossover strategy adapter
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │  Strategy   │────>│ SignalProcessor  │────>│ PaperExecutor  │
//! │  on_market_ │     │ - validate       │     │ - simulate fill│
//! │  event()    │     │ - rate limit     │     └────────────────┘
//! └─────────────┘     │ - gen order ID   │             │
//!        ^            └──────────────────┘             v
//!        │                                   ┌────────────────┐
//!        └───────────────────────────────────│ PositionLedger │
//!               on_order_update()            └────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_runner::{StrategyRunner, StrategyRunnerConfig};
//!
//! let config = StrategyRunnerConfig::default();
//! let mut runner = StrategyRunner::new(config);
//!
//! runner.register_strategy(Box::new(my_strategy));
//!
//! runner.run(market_rx, shutdown_rx).await?;
//! ```

mod error;
mod runner;
mod signal_processor;
pub mod strategies;
mod timer;

pub use error::{RunnerError, SignalError};
pub use runner::{StrategyRunner, StrategyRunnerConfig};
pub use signal_processor::{ProcessedSignal, SignalProcessor, SignalProcessorConfig};
pub use timer::TimerManager;
