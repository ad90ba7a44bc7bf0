//! Simulated fills for paper trading.

use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::{OrderSide, OrderType};

/// Counter for generating unique simulated order IDs.
static SIMULATED_ORDER_ID: AtomicU64 = AtomicU64::new(1_000_000);

/// Report of a (simulated) order fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillReport {
    /// Fill timestamp in milliseconds.
    pub event_time_ms: i64,
    /// Trading pair symbol.
    pub symbol: String,
    /// Client-generated order ID.
    pub client_order_id: String,
    /// Simulated exchange-assigned order ID.
    pub order_id: u64,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Filled quantity.
    pub quantity: Decimal,
    /// Execution price.
    pub fill_price: Decimal,
}

/// Generates simulated fills for paper mode.
///
/// Assumes immediate full fill: market orders at the current market price,
/// limit orders at their limit price. This lets strategies track the
/// positions their signals imply without any exchange.
pub struct PaperExecutor;

impl PaperExecutor {
    /// Create a simulated fill for an order.
    pub fn simulate_fill(
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        exec_price: Decimal,
        client_order_id: &str,
        timestamp_ms: i64,
    ) -> FillReport {
        FillReport {
            event_time_ms: timestamp_ms,
            symbol: symbol.to_string(),
            client_order_id: client_order_id.to_string(),
            order_id: SIMULATED_ORDER_ID.fetch_add(1, Ordering::Relaxed),
            side,
            order_type,
            quantity,
            fill_price: exec_price,
        }
    }
}
