// Scan orchestrator
// At most one pass over the scanners runs at a time

use std::sync::Arc;
use std::time::Instant;

use backend_domain::ports::Scanner;
use backend_domain::ScanOutcome;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::Metrics;

pub struct ScanOrchestrator {
    scanners: Vec<Arc<dyn Scanner>>,
    run_lock: Mutex<()>,
    metrics: Arc<Metrics>,
}

impl ScanOrchestrator {
    pub fn new(scanners: Vec<Arc<dyn Scanner>>, metrics: Arc<Metrics>) -> Self {
        Self {
            scanners,
            run_lock: Mutex::new(()),
            metrics,
        }
    }

    /// Runs every scanner once, in order. A trigger arriving while a pass
    /// is in flight is coalesced into that pass.
    pub async fn run_once(&self, trigger: &str) -> ScanOutcome {
        let Ok(_guard) = self.run_lock.try_lock() else {
            debug!(trigger, "scan already running, trigger coalesced");
            self.metrics.record_scan_coalesced();
            return ScanOutcome::Coalesced;
        };

        let started = Instant::now();
        let mut reports = Vec::with_capacity(self.scanners.len());
        for scanner in &self.scanners {
            match scanner.scan_once().await {
                Ok(report) => {
                    self.metrics.record_scan_report(&report);
                    if report.changed_anything() || report.files_failed > 0 {
                        info!(
                            scanner = report.scanner.as_str(),
                            files_processed = report.files_processed,
                            files_failed = report.files_failed,
                            rows_written = report.rows_written,
                            elapsed_ms = report.elapsed_ms,
                            "scan pass finished"
                        );
                    }
                    reports.push(report);
                }
                Err(err) => {
                    error!(scanner = scanner.name(), "scan pass failed: {:#}", err);
                }
            }
        }
        self.metrics.record_scan_completed();
        debug!(
            trigger,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan run complete"
        );
        ScanOutcome::Completed(reports)
    }

    /// Fire-and-forget variant used by the on-demand trigger.
    pub fn spawn_run(self: &Arc<Self>, trigger: &'static str) {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.run_once(trigger).await;
        });
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use backend_domain::ScanReport;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct BlockingScanner {
        calls: AtomicUsize,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Scanner for BlockingScanner {
        fn name(&self) -> &'static str {
            "blocking"
        }

        async fn scan_once(&self) -> anyhow::Result<ScanReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            let mut report = ScanReport::new("blocking");
            report.rows_written = 3;
            Ok(report)
        }
    }

    struct FailingScanner;

    #[async_trait]
    impl Scanner for FailingScanner {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn scan_once(&self) -> anyhow::Result<ScanReport> {
            anyhow::bail!("world folder missing")
        }
    }

    struct CountingScanner(AtomicUsize);

    #[async_trait]
    impl Scanner for CountingScanner {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn scan_once(&self) -> anyhow::Result<ScanReport> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(ScanReport::new("counting"))
        }
    }

    #[tokio::test]
    async fn concurrent_trigger_is_coalesced() {
        let scanner = Arc::new(BlockingScanner {
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let metrics = Arc::new(Metrics::default());
        let orchestrator = Arc::new(ScanOrchestrator::new(
            vec![scanner.clone() as Arc<dyn Scanner>],
            metrics.clone(),
        ));

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.run_once("timer").await })
        };
        scanner.entered.notified().await;
        assert!(orchestrator.is_running());

        let second = orchestrator.run_once("force_update").await;
        assert_eq!(second, ScanOutcome::Coalesced);

        scanner.release.notify_one();
        let first = first.await.expect("scan task");
        match first {
            ScanOutcome::Completed(reports) => {
                assert_eq!(reports.len(), 1);
                assert_eq!(reports[0].rows_written, 3);
            }
            ScanOutcome::Coalesced => panic!("first run should complete"),
        }
        assert_eq!(scanner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.scans_completed(), 1);
        assert_eq!(metrics.scans_coalesced(), 1);
        assert!(!orchestrator.is_running());
    }

    #[tokio::test]
    async fn failing_scanner_does_not_stop_later_scanners() {
        let counting = Arc::new(CountingScanner(AtomicUsize::new(0)));
        let orchestrator = ScanOrchestrator::new(
            vec![
                Arc::new(FailingScanner) as Arc<dyn Scanner>,
                counting.clone() as Arc<dyn Scanner>,
            ],
            Arc::new(Metrics::default()),
        );

        let outcome = orchestrator.run_once("timer").await;
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
        match outcome {
            ScanOutcome::Completed(reports) => {
                assert_eq!(reports.len(), 1);
                assert_eq!(reports[0].scanner, "counting");
            }
            ScanOutcome::Coalesced => panic!("nothing else was running"),
        }
    }
}
