use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Thread-safe metrics collector for the trading pipeline.
#[derive(Debug)]
pub struct BotMetrics {
    // Counters
    ticks_received: AtomicU64,
    invalid_ticks: AtomicU64,
    events_dispatched: AtomicU64,
    signals_generated: AtomicU64,
    signals_rejected: AtomicU64,
    paper_fills: AtomicU64,

    // Timestamps
    inner: RwLock<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    start_time: Instant,
    last_tick_time: Option<Instant>,
    last_signal_time: Option<Instant>,
}

impl Default for BotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BotMetrics {
    pub fn new() -> Self {
        Self {
            ticks_received: AtomicU64::new(0),
            invalid_ticks: AtomicU64::new(0),
            events_dispatched: AtomicU64::new(0),
            signals_generated: AtomicU64::new(0),
            signals_rejected: AtomicU64::new(0),
            paper_fills: AtomicU64::new(0),
            inner: RwLock::new(MetricsInner {
                start_time: Instant::now(),
                last_tick_time: None,
                last_signal_time: None,
            }),
        }
    }

    // --- Increment methods ---

    pub fn inc_ticks_received(&self) {
        self.ticks_received.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_tick_time = Some(Instant::now());
    }

    pub fn inc_invalid_ticks(&self) {
        self.invalid_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_events_dispatched(&self) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_signals_generated(&self) {
        self.signals_generated.fetch_add(1, Ordering::Relaxed);
        self.inner.write().last_signal_time = Some(Instant::now());
    }

    pub fn inc_signals_rejected(&self) {
        self.signals_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_paper_fills(&self) {
        self.paper_fills.fetch_add(1, Ordering::Relaxed);
    }

    // --- Getter methods ---

    pub fn ticks_received(&self) -> u64 {
        self.ticks_received.load(Ordering::Relaxed)
    }

    pub fn invalid_ticks(&self) -> u64 {
        self.invalid_ticks.load(Ordering::Relaxed)
    }

    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    pub fn signals_generated(&self) -> u64 {
        self.signals_generated.load(Ordering::Relaxed)
    }

    pub fn signals_rejected(&self) -> u64 {
        self.signals_rejected.load(Ordering::Relaxed)
    }

    pub fn paper_fills(&self) -> u64 {
        self.paper_fills.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> f64 {
        self.inner.read().start_time.elapsed().as_secs_f64()
    }

    pub fn secs_since_last_tick(&self) -> Option<f64> {
        self.inner
            .read()
            .last_tick_time
            .map(|t| t.elapsed().as_secs_f64())
    }

    pub fn secs_since_last_signal(&self) -> Option<f64> {
        self.inner
            .read()
            .last_signal_time
            .map(|t| t.elapsed().as_secs_f64())
    }

    /// Calculate ticks per second since start.
    pub fn ticks_per_second(&self) -> f64 {
        let uptime = self.uptime_secs();
        if uptime > 0.0 {
            self.ticks_received() as f64 / uptime
        } else {
            0.0
        }
    }

    /// Generate a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks_received: self.ticks_received(),
            invalid_ticks: self.invalid_ticks(),
            events_dispatched: self.events_dispatched(),
            signals_generated: self.signals_generated(),
            signals_rejected: self.signals_rejected(),
            paper_fills: self.paper_fills(),
            uptime_secs: self.uptime_secs(),
            ticks_per_second: self.ticks_per_second(),
            secs_since_last_tick: self.secs_since_last_tick(),
            secs_since_last_signal: self.secs_since_last_signal(),
        }
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub ticks_received: u64,
    pub invalid_ticks: u64,
    pub events_dispatched: u64,
    pub signals_generated: u64,
    pub signals_rejected: u64,
    pub paper_fills: u64,
    pub uptime_secs: f64,
    pub ticks_per_second: f64,
    pub secs_since_last_tick: Option<f64>,
    pub secs_since_last_signal: Option<f64>,
}

/// Health status of the pipeline, derived from tick recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Receiving data.
    Healthy,
    /// Data is going stale.
    Degraded,
    /// No data for an extended period.
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "HEALTHY"),
            HealthStatus::Degraded => write!(f, "DEGRADED"),
            HealthStatus::Unhealthy => write!(f, "UNHEALTHY"),
        }
    }
}

impl MetricsSnapshot {
    /// Threshold in seconds for considering data stale (degraded).
    const STALE_THRESHOLD_SECS: f64 = 30.0;
    /// Threshold in seconds for considering the pipeline unhealthy.
    const UNHEALTHY_THRESHOLD_SECS: f64 = 60.0;

    /// Determine the health status based on metrics.
    pub fn health_status(&self) -> HealthStatus {
        // If no tick has arrived yet, judge by uptime instead
        let secs_since_tick = match self.secs_since_last_tick {
            Some(secs) => secs,
            None => {
                if self.uptime_secs < Self::STALE_THRESHOLD_SECS {
                    return HealthStatus::Healthy;
                } else if self.uptime_secs < Self::UNHEALTHY_THRESHOLD_SECS {
                    return HealthStatus::Degraded;
                } else {
                    return HealthStatus::Unhealthy;
                }
            }
        };

        if secs_since_tick > Self::UNHEALTHY_THRESHOLD_SECS {
            HealthStatus::Unhealthy
        } else if secs_since_tick > Self::STALE_THRESHOLD_SECS {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Bot Metrics ===")?;
        writeln!(f, "Uptime:            {:.1}s", self.uptime_secs)?;
        writeln!(f, "Ticks received:    {}", self.ticks_received)?;
        writeln!(f, "Invalid ticks:     {}", self.invalid_ticks)?;
        writeln!(f, "Ticks/sec:         {:.2}", self.ticks_per_second)?;
        writeln!(f, "Events dispatched: {}", self.events_dispatched)?;
        writeln!(f, "Signals generated: {}", self.signals_generated)?;
        writeln!(f, "Signals rejected:  {}", self.signals_rejected)?;
        writeln!(f, "Paper fills:       {}", self.paper_fills)?;
        if let Some(secs) = self.secs_since_last_tick {
            writeln!(f, "Since last tick:   {:.1}s", secs)?;
        }
        if let Some(secs) = self.secs_since_last_signal {
            writeln!(f, "Since last signal: {:.1}s", secs)?;
        }
        Ok(())
    }
}

/// Shared handle to metrics.
pub type SharedMetrics = Arc<BotMetrics>;

pub fn create_metrics() -> SharedMetrics {
    Arc::new(BotMetrics::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(
        uptime_secs: f64,
        secs_since_last_tick: Option<f64>,
    ) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks_received: 0,
            invalid_ticks: 0,
            events_dispatched: 0,
            signals_generated: 0,
            signals_rejected: 0,
            paper_fills: 0,
            uptime_secs,
            ticks_per_second: 0.0,
            secs_since_last_tick,
            secs_since_last_signal: None,
        }
    }

    #[test]
    fn test_metrics_increment() {
        let metrics = BotMetrics::new();

        metrics.inc_ticks_received();
        metrics.inc_ticks_received();
        metrics.inc_signals_generated();
        metrics.inc_invalid_ticks();

        assert_eq!(metrics.ticks_received(), 2);
        assert_eq!(metrics.signals_generated(), 1);
        assert_eq!(metrics.invalid_ticks(), 1);
    }

    #[test]
    fn test_metrics_snapshot() {
        let metrics = BotMetrics::new();

        metrics.inc_ticks_received();
        metrics.inc_paper_fills();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ticks_received, 1);
        assert_eq!(snapshot.paper_fills, 1);
        assert!(snapshot.uptime_secs >= 0.0);
    }

    #[test]
    fn test_last_tick_time() {
        let metrics = BotMetrics::new();

        assert!(metrics.secs_since_last_tick().is_none());

        metrics.inc_ticks_received();

        let secs = metrics.secs_since_last_tick();
        assert!(secs.is_some());
        assert!(secs.unwrap() < 1.0);
    }

    #[test]
    fn test_health_status_healthy_with_recent_tick() {
        let snapshot = snapshot_with(120.0, Some(5.0));
        assert_eq!(snapshot.health_status(), HealthStatus::Healthy);
    }

    #[test]
    fn test_health_status_healthy_during_startup() {
        // No ticks yet, but uptime is short
        let snapshot = snapshot_with(10.0, None);
        assert_eq!(snapshot.health_status(), HealthStatus::Healthy);
    }

    #[test]
    fn test_health_status_degraded_when_stale() {
        let snapshot = snapshot_with(120.0, Some(45.0));
        assert_eq!(snapshot.health_status(), HealthStatus::Degraded);
    }

    #[test]
    fn test_health_status_unhealthy_when_silent() {
        let snapshot = snapshot_with(300.0, Some(90.0));
        assert_eq!(snapshot.health_status(), HealthStatus::Unhealthy);

        // Never received a tick and well past startup
        let snapshot = snapshot_with(300.0, None);
        assert_eq!(snapshot.health_status(), HealthStatus::Unhealthy);
    }
}
