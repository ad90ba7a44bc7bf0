use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single observed price tick for an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub price: Decimal,
    pub timestamp_ms: i64,
    pub tick_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketEvent {
    Tick(Tick),
}

impl MarketEvent {
    /// Symbol the event refers to.
    pub fn symbol(&self) -> &str {
        match self {
            MarketEvent::Tick(tick) => &tick.symbol,
        }
    }
}
