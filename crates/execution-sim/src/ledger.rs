//! Net position tracking from fills.
//!
//! Keeps one signed net quantity per symbol and projects it to the
//! `PositionState` the signal evaluator consumes. Deliberately direction-only:
//! entry prices, PnL and commissions belong to an external accounting system.

use std::sync::Arc;

use crossover::PositionState;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::fill::FillReport;
use crate::order::OrderSide;

/// Thread-safe per-symbol net position ledger.
pub struct PositionLedger {
    net_quantities: DashMap<String, Decimal>,
}

impl PositionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            net_quantities: DashMap::new(),
        }
    }

    /// Apply a fill to the net quantity for its symbol.
    pub fn apply_fill(&self, report: &FillReport) {
        let delta = match report.side {
            OrderSide::Buy => report.quantity,
            OrderSide::Sell => -report.quantity,
        };
        let mut entry = self
            .net_quantities
            .entry(report.symbol.clone())
            .or_insert(Decimal::ZERO);
        *entry += delta;
    }

    /// Net signed quantity for a symbol (zero if never traded).
    pub fn net_quantity(&self, symbol: &str) -> Decimal {
        self.net_quantities
            .get(symbol)
            .map(|q| *q)
            .unwrap_or(Decimal::ZERO)
    }

    /// Current holding direction for a symbol.
    pub fn position_state(&self, symbol: &str) -> PositionState {
        let qty = self.net_quantity(symbol);
        if qty > Decimal::ZERO {
            PositionState::Long
        } else if qty < Decimal::ZERO {
            PositionState::Short
        } else {
            PositionState::Flat
        }
    }

    /// Number of symbols with a non-zero position.
    pub fn open_position_count(&self) -> usize {
        self.net_quantities
            .iter()
            .filter(|entry| *entry.value() != Decimal::ZERO)
            .count()
    }
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared position ledger handle.
pub type SharedPositionLedger = Arc<PositionLedger>;

/// Create a new shared position ledger.
pub fn create_position_ledger() -> SharedPositionLedger {
    Arc::new(PositionLedger::new())
}
