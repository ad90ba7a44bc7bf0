//! Strategy context providing market and position state access.

use std::collections::HashMap;
use std::sync::Arc;

use crossover::PositionState;
use execution_sim::SharedPositionLedger;
use parking_lot::RwLock;
use rust_decimal::Decimal;

/// Market state shared between strategies and the runner.
pub struct MarketState {
    /// Last observed prices indexed by symbol.
    last_prices: RwLock<HashMap<String, Decimal>>,
}

impl MarketState {
    /// Create a new empty market state.
    pub fn new() -> Self {
        Self {
            last_prices: RwLock::new(HashMap::new()),
        }
    }

    /// Update the last observed price for a symbol.
    pub fn update_last_price(&self, symbol: &str, price: Decimal) {
        let mut prices = self.last_prices.write();
        prices.insert(symbol.to_string(), price);
    }

    /// Get the last observed price for a symbol.
    pub fn last_price(&self, symbol: &str) -> Option<Decimal> {
        let prices = self.last_prices.read();
        prices.get(symbol).copied()
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared market state handle.
pub type SharedMarketState = Arc<MarketState>;

/// Create a new shared market state.
pub fn create_market_state() -> SharedMarketState {
    Arc::new(MarketState::new())
}

/// Context provided to strategies during execution.
///
/// Read-only: strategies query last prices and their current position here
/// instead of reaching into shared mutable runner state.
pub struct StrategyContext {
    /// Current timestamp in milliseconds since epoch.
    pub timestamp_ms: i64,
    /// Shared market state.
    market_state: SharedMarketState,
    /// Position ledger owned by the execution layer.
    positions: SharedPositionLedger,
}

impl StrategyContext {
    /// Create a new strategy context.
    pub fn new(
        timestamp_ms: i64,
        market_state: SharedMarketState,
        positions: SharedPositionLedger,
    ) -> Self {
        Self {
            timestamp_ms,
            market_state,
            positions,
        }
    }

    /// Get the last observed price for a symbol.
    pub fn last_price(&self, symbol: &str) -> Option<Decimal> {
        self.market_state.last_price(symbol)
    }

    /// Current holding direction for a symbol.
    pub fn position(&self, symbol: &str) -> PositionState {
        self.positions.position_state(symbol)
    }

    /// Net signed position quantity for a symbol.
    pub fn net_quantity(&self, symbol: &str) -> Decimal {
        self.positions.net_quantity(symbol)
    }
}
