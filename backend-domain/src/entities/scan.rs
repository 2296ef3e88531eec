// Scan run results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub scanner: String,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub rows_written: u64,
    pub elapsed_ms: u64,
}

impl ScanReport {
    pub fn new(scanner: impl Into<String>) -> Self {
        Self {
            scanner: scanner.into(),
            ..Self::default()
        }
    }

    pub fn changed_anything(&self) -> bool {
        self.files_processed > 0 || self.rows_written > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed(Vec<ScanReport>),
    /// Another run held the single-flight guard.
    Coalesced,
}
