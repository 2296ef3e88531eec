// Staleness gate shared by every scanner ledger

/// What the ledger remembers about the last applied version of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStamp {
    pub last_modified: i64,
    pub last_processed: i64,
}

impl SyncStamp {
    pub fn is_current_for(&self, modified_millis: i64) -> bool {
        self.last_modified == modified_millis && self.last_processed >= modified_millis
    }
}

/// A file needs work when it was never recorded, its mtime moved,
/// or it was touched after it was last processed.
pub fn should_process(stored: Option<SyncStamp>, modified_millis: i64) -> bool {
    match stored {
        Some(stamp) => !stamp.is_current_for(modified_millis),
        None => true,
    }
}
