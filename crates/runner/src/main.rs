use std::time::Duration;

use crossover::AverageKind;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{error, info};

use common::RunMode;
use metrics::create_metrics;
use mock_feed::{create_event_channel, run_feed, FeedConfig};
use strategy_runner::strategies::{MaCrossConfig, MaCrossStrategy};
use strategy_runner::{StrategyRunner, StrategyRunnerConfig};

/// Interval for periodic health status logging.
const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Default quantity traded per signal.
const DEFAULT_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 3); // 0.001

#[tokio::main]
async fn main() {
    common::init_logging();

    let mode = RunMode::from_env();
    if mode.is_live() {
        error!("live mode requires an external execution adapter; refusing to start");
        std::process::exit(1);
    }

    let symbols = std::env::args().skip(1).collect::<Vec<_>>();
    let symbols = if symbols.is_empty() {
        vec!["BTCUSDT".to_string()]
    } else {
        symbols
    };

    let kind = match std::env::var("MA_KIND").as_deref() {
        Ok("ema") | Ok("exponential") => AverageKind::Exponential,
        _ => AverageKind::Simple,
    };
    let fast_period = env_usize("FAST_PERIOD", 10);
    let slow_period = env_usize("SLOW_PERIOD", 20);

    info!(
        mode = %mode,
        symbols = ?symbols,
        kind = ?kind,
        fast_period,
        slow_period,
        "starting crossover bot"
    );

    let feed_config = FeedConfig {
        symbols: symbols.clone(),
        ..FeedConfig::default()
    };

    let (sender, receiver) = create_event_channel(feed_config.channel_capacity);

    let metrics = create_metrics();

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn feed task
    let feed_metrics = metrics.clone();
    let feed_handle = tokio::spawn(async move {
        if let Err(e) = run_feed(feed_config, sender, shutdown_rx, feed_metrics).await {
            tracing::error!(error = %e, "mock feed error");
        }
    });

    // Spawn ctrl_c handler
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, initiating shutdown");
            let _ = shutdown_tx_clone.send(true);
        }
    });

    // Spawn periodic health reporter
    let health_metrics = metrics.clone();
    let mut health_shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEALTH_LOG_INTERVAL);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let snapshot = health_metrics.snapshot();
                    let status = snapshot.health_status();
                    info!(
                        status = %status,
                        ticks = snapshot.ticks_received,
                        ticks_per_sec = format!("{:.1}", snapshot.ticks_per_second),
                        signals = snapshot.signals_generated,
                        fills = snapshot.paper_fills,
                        "health check"
                    );
                }
                changed = health_shutdown_rx.changed() => {
                    if changed.is_err() || *health_shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });

    // Build the strategy runner with one crossover strategy per symbol
    let mut runner = StrategyRunner::new(StrategyRunnerConfig::default()).with_metrics(metrics.clone());
    let positions = runner.positions().clone();

    for symbol in &symbols {
        let config = MaCrossConfig {
            symbol: symbol.clone(),
            kind,
            fast_period,
            slow_period,
            quantity: DEFAULT_QUANTITY,
        };
        match MaCrossStrategy::new(format!("ma_cross_{}", symbol.to_lowercase()), config) {
            Ok(strategy) => runner.register_strategy(Box::new(strategy)),
            Err(e) => {
                error!(symbol = %symbol, error = %e, "invalid strategy configuration");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = runner.run(receiver, shutdown_tx.subscribe()).await {
        error!(error = %e, "strategy runner error");
    }

    // Wait for the feed to finish
    let _ = feed_handle.await;

    // Print final metrics and positions
    let snapshot = metrics.snapshot();
    println!("\n{}", snapshot);
    for symbol in &symbols {
        println!(
            "{}: position {:?}, net qty {}",
            symbol,
            positions.position_state(symbol),
            positions.net_quantity(symbol)
        );
    }

    info!("shutdown complete");
}

/// Read a usize env var, falling back to a default when unset or invalid.
fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
