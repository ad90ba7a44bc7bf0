//! Simulated order execution and position tracking.
//!
//! This crate provides the external collaborators the strategy layer talks
//! to in paper mode:
//!
//! - **Order vocabulary**: `OrderSide`, `OrderType`, client order IDs
//! - **Paper fills**: `PaperExecutor` turns order intents into immediate
//!   simulated `FillReport`s
//! - **Position ledger**: `PositionLedger` tracks net quantity per symbol
//!   and projects it to a `PositionState` for signal evaluation

mod fill;
mod ledger;
mod order;

pub use fill::{FillReport, PaperExecutor};
pub use ledger::{create_position_ledger, PositionLedger, SharedPositionLedger};
pub use order::{generate_client_order_id, OrderSide, OrderType};

// Re-exported so ledger consumers don't need a direct crossover dependency.
pub use crossover::PositionState;
