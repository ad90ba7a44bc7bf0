//! Synthetic market data feed.
//!
//! Generates a bounded random walk of ticks per symbol and pushes them into
//! the event channel the strategy runner consumes. Stands in for a real
//! exchange connector during development and tests.

mod generator;

use model::MarketEvent;
use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

pub use generator::run_feed;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("channel closed")]
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Symbols to generate ticks for.
    pub symbols: Vec<String>,
    /// Channel buffer capacity.
    pub channel_capacity: usize,
    /// Delay between tick rounds (one tick per symbol per round).
    pub tick_interval: Duration,
    /// Starting price for every symbol's walk.
    pub start_price: Decimal,
    /// Maximum per-tick move in basis points of the current price.
    pub max_step_bps: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDT".to_string()],
            channel_capacity: 1024,
            tick_interval: Duration::from_millis(100),
            start_price: Decimal::from(50_000),
            max_step_bps: 20,
        }
    }
}

pub type EventSender = mpsc::Sender<MarketEvent>;
pub type EventReceiver = mpsc::Receiver<MarketEvent>;

pub fn create_event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity)
}
