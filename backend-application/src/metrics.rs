use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::ScanReport;

#[derive(Debug, Default)]
pub struct Metrics {
    rpc_requests: AtomicU64,
    rpc_errors: AtomicU64,
    scans_completed: AtomicU64,
    scans_coalesced: AtomicU64,
    files_processed: AtomicU64,
    rows_written: AtomicU64,
}

impl Metrics {
    pub fn record_request(&self) {
        self.rpc_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_error(&self) {
        self.rpc_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_completed(&self) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_coalesced(&self) {
        self.scans_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_report(&self, report: &ScanReport) {
        self.files_processed
            .fetch_add(report.files_processed, Ordering::Relaxed);
        self.rows_written
            .fetch_add(report.rows_written, Ordering::Relaxed);
    }

    pub fn scans_completed(&self) -> u64 {
        self.scans_completed.load(Ordering::Relaxed)
    }

    pub fn scans_coalesced(&self) -> u64 {
        self.scans_coalesced.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.rpc_requests.load(Ordering::Relaxed);
        let errors = self.rpc_errors.load(Ordering::Relaxed);
        let completed = self.scans_completed.load(Ordering::Relaxed);
        let coalesced = self.scans_coalesced.load(Ordering::Relaxed);
        let files = self.files_processed.load(Ordering::Relaxed);
        let rows = self.rows_written.load(Ordering::Relaxed);

        format!(
            "# TYPE beacon_rpc_requests_total counter\n\
beacon_rpc_requests_total {}\n\
# TYPE beacon_rpc_errors_total counter\n\
beacon_rpc_errors_total {}\n\
# TYPE beacon_scans_completed_total counter\n\
beacon_scans_completed_total {}\n\
# TYPE beacon_scans_coalesced_total counter\n\
beacon_scans_coalesced_total {}\n\
# TYPE beacon_scan_files_processed_total counter\n\
beacon_scan_files_processed_total {}\n\
# TYPE beacon_scan_rows_written_total counter\n\
beacon_scan_rows_written_total {}\n",
            requests, errors, completed, coalesced, files, rows
        )
    }
}
