//! Core strategy types and traits for the trading bot.
//!
//! This crate provides the building blocks for implementing strategies:
//!
//! - **Strategy trait**: the core `Strategy` trait all strategies implement
//! - **Signal types**: `Signal` and `OrderIntent` for expressing trading intent
//! - **Context**: `StrategyContext` providing read-only access to last prices
//!   and current positions
//!
//! # Example Strategy
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use model::MarketEvent;
//! use strategy_core::{OrderIntent, Signal, Strategy, StrategyContext, StrategyError};
//! use rust_decimal_macros::dec;
//!
//! struct SimpleStrategy {
//!     id: String,
//! }
//!
//! #[async_trait]
//! impl Strategy for SimpleStrategy {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     async fn on_market_event(
//!         &mut self,
//!         event: &MarketEvent,
//!         ctx: &StrategyContext,
//!     ) -> Result<Option<Signal>, StrategyError> {
//!         // React to ticks and optionally generate signals
//!         Ok(None)
//!     }
//! }
//! ```

mod context;
mod error;
mod signal;
mod strategy;

pub use context::{create_market_state, MarketState, SharedMarketState, StrategyContext};
pub use error::StrategyError;
pub use signal::{OrderIntent, Signal};
pub use strategy::{BoxedStrategy, Strategy};

// Re-export commonly used types from dependencies for convenience
pub use crossover::PositionState;
pub use execution_sim::{FillReport, OrderSide, OrderType};
pub use model::MarketEvent;
