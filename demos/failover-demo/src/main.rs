//! Process wiring example for `failover-core`: a binary showing one way to
//! assemble the controller from its pieces (clock, store, alert sink, two
//! connectors) and drive it through a trip/cooldown/recovery cycle.
//!
//! This is deliberately outside the core crate's public contract — `spec.md`
//! §1 explicitly excludes "configuration loading, logging setup, process
//! wiring" from the controller itself. What lives here is just one example
//! of that wiring, using an in-memory store so the whole thing runs without
//! external services.

mod binance;

use std::sync::Arc;
use std::time::Duration;

use failover_core::clock::Clock;
use failover_core::connector::{CallOutcome, Connector};
use failover_core::store::memory::InMemoryStore;
use failover_core::store::StateStore;
use failover_core::{AlertSink, Config, Dispatcher, FailoverController, LoggingAlertSink, SystemClock};

use binance::{BinanceConnector, OkxConnector};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let clock = Arc::new(SystemClock::new());
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    let alert = Arc::new(LoggingAlertSink);
    let primary = Arc::new(BinanceConnector);
    let standby = Arc::new(OkxConnector);

    // Scaled down from the production defaults (`N_trip=5`, `T_err=30s`,
    // `T_lock=30m`) so the whole trip/cooldown/recovery cycle plays out in a
    // few seconds instead of half an hour.
    let config = Config::new()
        .with_err_threshold(3)
        .with_err_ttl_ms(5_000)
        .with_lock_ttl_ms(6_000);

    let clock_dyn: Arc<dyn Clock> = clock.clone();
    let store_dyn: Arc<dyn StateStore> = store.clone();
    let alert_dyn: Arc<dyn AlertSink> = alert.clone();
    let primary_dyn: Arc<dyn Connector> = primary.clone();
    let standby_dyn: Arc<dyn Connector> = standby.clone();

    let controller = Arc::new(FailoverController::new(
        config,
        store_dyn,
        clock_dyn,
        alert_dyn,
        primary_dyn,
        standby_dyn,
    ));
    let dispatcher = Dispatcher::new(controller);

    tracing::info!("--- steady state: two successful calls on PRIMARY ---");
    for _ in 0..2 {
        let outcome = dispatcher
            .invoke(
                |id, _c| async move { Ok(CallOutcome::success(id, b"{\"ok\":true}".to_vec())) },
                None,
                false,
            )
            .await;
        tracing::info!(route = %dispatcher.now_connect().await, ok = outcome.is_ok(), "call done");
    }

    tracing::info!("--- three consecutive system-abnormal failures on PRIMARY ---");
    for _ in 0..3 {
        let outcome = dispatcher
            .invoke(
                |id, _c| async move { Ok(CallOutcome::failure(id, "-1001")) },
                None,
                false,
            )
            .await;
        tracing::info!(route = %dispatcher.now_connect().await, ok = outcome.is_ok(), "call done");
    }
    tracing::info!(route = %dispatcher.now_connect().await, "tripped to STANDBY, cooldown armed");

    tracing::info!("--- an ordinary business rejection on STANDBY changes nothing ---");
    let outcome = dispatcher
        .invoke(
            |id, _c| async move { Ok(CallOutcome::failure(id, "insufficient_balance")) },
            None,
            false,
        )
        .await;
    tracing::info!(route = %dispatcher.now_connect().await, ok = outcome.is_ok(), "call done");

    tracing::info!("--- waiting past the cooldown floor ---");
    tokio::time::sleep(Duration::from_secs(7)).await;

    tracing::info!("--- a successful call on STANDBY now flips back to PRIMARY ---");
    let outcome = dispatcher
        .invoke(
            |id, _c| async move { Ok(CallOutcome::success(id, b"{\"ok\":true}".to_vec())) },
            None,
            false,
        )
        .await;
    tracing::info!(route = %dispatcher.now_connect().await, ok = outcome.is_ok(), "recovered");
}
