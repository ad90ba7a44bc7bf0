//! Random-walk tick generation.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info};

use metrics::SharedMetrics;
use model::{MarketEvent, Tick};

use crate::{EventSender, FeedConfig, FeedError};

/// Price floor keeping the walk strictly positive.
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Run the synthetic feed until shutdown or the channel closes.
///
/// Each round emits one tick per configured symbol; every symbol walks
/// independently from `start_price`, moving at most `max_step_bps` basis
/// points per tick and never below a positive floor.
pub async fn run_feed(
    config: FeedConfig,
    sender: EventSender,
    mut shutdown_rx: watch::Receiver<bool>,
    metrics: SharedMetrics,
) -> Result<(), FeedError> {
    info!(
        symbols = ?config.symbols,
        interval_ms = %config.tick_interval.as_millis(),
        max_step_bps = config.max_step_bps,
        "starting mock feed"
    );

    let mut rng = StdRng::from_entropy();
    let mut prices: HashMap<String, Decimal> = config
        .symbols
        .iter()
        .map(|s| (s.clone(), config.start_price))
        .collect();
    let mut tick_id: u64 = 0;

    let mut interval = tokio::time::interval(config.tick_interval);

    loop {
        tokio::select! {
            biased;

            // A dropped sender counts as shutdown
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!("mock feed shutting down");
                    return Ok(());
                }
            }

            _ = interval.tick() => {
                for symbol in &config.symbols {
                    let Some(price) = prices.get_mut(symbol) else {
                        continue;
                    };

                    let step_bps = rng.gen_range(-config.max_step_bps..=config.max_step_bps);
                    *price += *price * Decimal::new(step_bps, 4);
                    if *price < MIN_PRICE {
                        *price = MIN_PRICE;
                    }

                    tick_id += 1;
                    let tick = Tick {
                        symbol: symbol.clone(),
                        price: *price,
                        timestamp_ms: timestamp_ms(),
                        tick_id,
                    };

                    debug!(symbol = %symbol, price = %tick.price, tick_id, "generated tick");

                    if sender.send(MarketEvent::Tick(tick)).await.is_err() {
                        return Err(FeedError::ChannelClosed);
                    }
                    metrics.inc_ticks_received();
                }
            }
        }
    }
}

fn timestamp_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_event_channel;
    use metrics::create_metrics;
    use std::time::Duration;

    fn test_config() -> FeedConfig {
        FeedConfig {
            symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            channel_capacity: 64,
            tick_interval: Duration::from_millis(1),
            start_price: Decimal::from(100),
            max_step_bps: 50,
        }
    }

    #[tokio::test]
    async fn test_generates_positive_ticks_for_all_symbols() {
        let config = test_config();
        let (sender, mut receiver) = create_event_channel(config.channel_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let metrics = create_metrics();

        let handle = tokio::spawn(run_feed(config, sender, shutdown_rx, metrics.clone()));

        let mut seen = std::collections::HashSet::new();
        for _ in 0..10 {
            let MarketEvent::Tick(tick) = receiver.recv().await.expect("feed should produce");
            assert!(tick.price > Decimal::ZERO);
            seen.insert(tick.symbol);
        }
        assert!(seen.contains("BTCUSDT"));
        assert!(seen.contains("ETHUSDT"));

        shutdown_tx.send(true).unwrap();
        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert!(metrics.ticks_received() >= 10);
    }

    #[tokio::test]
    async fn test_stops_when_shutdown_sender_dropped() {
        let config = test_config();
        let (sender, _receiver) = create_event_channel(4);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        drop(shutdown_tx);

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            run_feed(config, sender, shutdown_rx, create_metrics()),
        )
        .await
        .expect("feed must stop after shutdown sender drop");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stops_when_channel_closes() {
        let config = test_config();
        let (sender, receiver) = create_event_channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        drop(receiver);

        let result = run_feed(config, sender, shutdown_rx, create_metrics()).await;
        assert!(matches!(result, Err(FeedError::ChannelClosed)));
    }
}
