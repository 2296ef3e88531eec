use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use backend_application::ScanOrchestrator;
use backend_domain::ScanOutcome;

/// Periodic trigger. The first pass starts one interval after launch.
pub async fn schedule_scans(orchestrator: Arc<ScanOrchestrator>, interval: Duration) {
    info!("scan scheduler started, interval {:?}", interval);
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let ScanOutcome::Coalesced = orchestrator.run_once("timer").await {
            debug!("timer tick skipped, a scan was already running");
        }
    }
}
