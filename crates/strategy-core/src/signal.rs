//! Trading intent emitted by strategies.

use execution_sim::{OrderSide, OrderType};
use rust_decimal::Decimal;

/// An order a strategy wants placed.
#[derive(Debug, Clone)]
pub struct OrderIntent {
    /// Trading pair symbol.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity to trade.
    pub quantity: Decimal,
    /// Limit price; `None` for market orders.
    pub price: Option<Decimal>,
}

impl OrderIntent {
    /// Market buy at the current price.
    pub fn market_buy(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    /// Market sell at the current price.
    pub fn market_sell(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Sell,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    /// Limit buy at the given price.
    pub fn limit_buy(symbol: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }

    /// Limit sell at the given price.
    pub fn limit_sell(symbol: impl Into<String>, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }
}

/// A signal produced by a strategy, carrying one order intent.
#[derive(Debug, Clone)]
pub struct Signal {
    /// ID of the strategy that produced the signal.
    pub strategy_id: String,
    /// The order to place.
    pub intent: OrderIntent,
    /// Optional human-readable reason, for logs.
    pub reason: Option<String>,
}

impl Signal {
    /// Create a signal without a reason.
    pub fn order(strategy_id: impl Into<String>, intent: OrderIntent) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            intent,
            reason: None,
        }
    }

    /// Create a signal with a reason string.
    pub fn with_reason(
        strategy_id: impl Into<String>,
        intent: OrderIntent,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            intent,
            reason: Some(reason.into()),
        }
    }
}
