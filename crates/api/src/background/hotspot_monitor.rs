//! Periodic hotspot monitor.
//!
//! Runs a monitor pass on a fixed interval using `tokio::time::interval`.
//! A failed pass is logged and retried on the next tick.

use std::time::Duration;

use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use trashmap_pipeline::monitor::{run_monitor_pass, MonitorSettings};

/// Run the monitor loop until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    settings: MonitorSettings,
    every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = every.as_secs(),
        lookback_days = settings.lookback_days,
        grid_precision = settings.grid_precision,
        threshold = settings.policy.threshold(),
        "Hotspot monitor started"
    );

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Hotspot monitor stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = run_monitor_pass(&pool, &settings).await {
                    tracing::error!(error = %e, "Hotspot monitor: pass failed");
                }
            }
        }
    }
}
