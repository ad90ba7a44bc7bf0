//! Timer management for strategy periodic callbacks.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tracks timer state for multiple strategies.
pub struct TimerManager {
    /// Strategy ID -> (interval, last_fired)
    timers: HashMap<String, (Duration, Instant)>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
        }
    }

    /// Register a timer for a strategy.
    pub fn register(&mut self, strategy_id: impl Into<String>, interval: Duration) {
        self.timers
            .insert(strategy_id.into(), (interval, Instant::now()));
    }

    /// Remove a timer for a strategy.
    pub fn unregister(&mut self, strategy_id: &str) {
        self.timers.remove(strategy_id);
    }

    /// Check which strategy timers are due and return their IDs.
    ///
    /// Updates the last_fired time for each fired timer.
    pub fn check_due(&mut self) -> Vec<String> {
        let now = Instant::now();
        let mut due = Vec::new();

        for (strategy_id, (interval, last_fired)) in &mut self.timers {
            if now.duration_since(*last_fired) >= *interval {
                due.push(strategy_id.clone());
                *last_fired = now;
            }
        }

        due
    }

    /// Returns the number of registered timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns whether any timers are registered.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}
