//! Signal processor with validation and rate limiting.

use std::collections::HashMap;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use execution_sim::{generate_client_order_id, OrderType};
use strategy_core::{OrderIntent, Signal};

use crate::error::SignalError;

/// Configuration for the signal processor.
#[derive(Debug, Clone)]
pub struct SignalProcessorConfig {
    /// Maximum orders per second per strategy.
    pub max_orders_per_second: u32,
    /// Minimum order notional value.
    pub min_order_notional: Decimal,
    /// Maximum order notional value.
    pub max_order_notional: Decimal,
    /// Prefix for generated client order IDs.
    pub order_id_prefix: String,
}

impl Default for SignalProcessorConfig {
    fn default() -> Self {
        Self {
            max_orders_per_second: 5,
            min_order_notional: Decimal::from(10),
            max_order_notional: Decimal::from(100_000),
            order_id_prefix: "bot".to_string(),
        }
    }
}

/// A processed signal ready for execution.
#[derive(Debug)]
pub struct ProcessedSignal {
    /// The original signal.
    pub signal: Signal,
    /// Generated client order ID.
    pub client_order_id: String,
}

/// Signal processor that validates signals and enforces rate limits.
pub struct SignalProcessor {
    config: SignalProcessorConfig,
    /// Rate limit tracking: strategy_id -> (window_start, order_count)
    rate_limits: HashMap<String, (Instant, u32)>,
}

impl SignalProcessor {
    /// Create a new signal processor with the given configuration.
    pub fn new(config: SignalProcessorConfig) -> Self {
        Self {
            config,
            rate_limits: HashMap::new(),
        }
    }

    /// Process a signal, performing validation and rate limiting.
    ///
    /// `market_price` is the last observed price for the intent's symbol;
    /// it values market orders for the notional check. Returns a
    /// `ProcessedSignal` if the signal passes all checks.
    pub fn process(
        &mut self,
        signal: Signal,
        market_price: Option<Decimal>,
    ) -> Result<ProcessedSignal, SignalError> {
        self.check_rate_limit(&signal.strategy_id)?;
        self.validate_order(&signal.intent, market_price)?;

        let client_order_id = generate_client_order_id(&self.config.order_id_prefix);

        self.increment_rate_limit(&signal.strategy_id);

        debug!(
            strategy_id = %signal.strategy_id,
            symbol = %signal.intent.symbol,
            side = ?signal.intent.side,
            client_order_id = %client_order_id,
            "signal processed"
        );

        Ok(ProcessedSignal {
            signal,
            client_order_id,
        })
    }

    /// Check if the strategy has exceeded its rate limit.
    fn check_rate_limit(&self, strategy_id: &str) -> Result<(), SignalError> {
        if let Some((window_start, count)) = self.rate_limits.get(strategy_id) {
            let elapsed = window_start.elapsed();
            if elapsed.as_secs() < 1 && *count >= self.config.max_orders_per_second {
                warn!(
                    strategy_id = %strategy_id,
                    count = %count,
                    max = %self.config.max_orders_per_second,
                    "rate limit exceeded"
                );
                return Err(SignalError::RateLimitExceeded(
                    self.config.max_orders_per_second,
                ));
            }
        }
        Ok(())
    }

    /// Increment the rate limit counter for a strategy.
    fn increment_rate_limit(&mut self, strategy_id: &str) {
        let now = Instant::now();
        let entry = self
            .rate_limits
            .entry(strategy_id.to_string())
            .or_insert((now, 0));

        // Reset window if more than 1 second has passed
        if entry.0.elapsed().as_secs() >= 1 {
            *entry = (now, 1);
        } else {
            entry.1 += 1;
        }
    }

    /// Validate an order intent.
    fn validate_order(
        &self,
        intent: &OrderIntent,
        market_price: Option<Decimal>,
    ) -> Result<(), SignalError> {
        if intent.quantity <= Decimal::ZERO {
            return Err(SignalError::InvalidOrder(
                "quantity must be positive".to_string(),
            ));
        }

        if matches!(intent.order_type, OrderType::Limit) && intent.price.is_none() {
            return Err(SignalError::MissingPrice);
        }

        if let Some(price) = intent.price {
            if price <= Decimal::ZERO {
                return Err(SignalError::InvalidOrder(
                    "price must be positive".to_string(),
                ));
            }
            self.validate_notional(price * intent.quantity)?;
        } else if let Some(price) = market_price {
            // Market orders are valued at the last observed price. Without
            // one the notional check is skipped; the executor drops such
            // orders anyway for lack of a fill price.
            self.validate_notional(price * intent.quantity)?;
        }

        Ok(())
    }

    /// Validate order notional value.
    fn validate_notional(&self, notional: Decimal) -> Result<(), SignalError> {
        if notional < self.config.min_order_notional {
            return Err(SignalError::NotionalTooSmall(
                notional.to_string(),
                self.config.min_order_notional.to_string(),
            ));
        }

        if notional > self.config.max_order_notional {
            return Err(SignalError::NotionalTooLarge(
                notional.to_string(),
                self.config.max_order_notional.to_string(),
            ));
        }

        Ok(())
    }
}
