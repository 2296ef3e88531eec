// File sync ledger entities

use serde::{Deserialize, Serialize};

use crate::services::SyncStamp;
use crate::value_objects::SourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSyncState {
    pub file_type: String,
    pub player_uuid: Option<String>,
    pub file_path: String,
    pub last_modified: i64,
    pub last_processed: i64,
}

impl FileSyncState {
    pub fn new(
        kind: SourceKind,
        player_uuid: Option<String>,
        file_path: impl Into<String>,
        last_modified: i64,
        last_processed: i64,
    ) -> Self {
        Self {
            file_type: kind.as_str().to_string(),
            player_uuid,
            file_path: file_path.into(),
            last_modified,
            last_processed,
        }
    }

    pub fn stamp(&self) -> SyncStamp {
        SyncStamp {
            last_modified: self.last_modified,
            last_processed: self.last_processed,
        }
    }
}

/// Ledger row for one change-log CSV, including how many records were appended so far.
/// `prefix_digest` fingerprints those records; rows written before it existed carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogFileState {
    pub file_path: String,
    pub last_modified: i64,
    pub last_processed: i64,
    pub dimension_context: String,
    pub rows_consumed: i64,
    pub prefix_digest: Option<String>,
}

impl ChangeLogFileState {
    pub fn stamp(&self) -> SyncStamp {
        SyncStamp {
            last_modified: self.last_modified,
            last_processed: self.last_processed,
        }
    }
}
