// Change-log entity
// One row per CSV record; never rewritten after insertion

use serde::{Deserialize, Serialize};

use crate::value_objects::{ChangeLogOrderColumn, ChangeLogWindow, SortDirection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: i64,
    pub timestamp: Option<String>,
    pub player_name: Option<String>,
    pub player_uuid: Option<String>,
    pub class_name: Option<String>,
    pub entry_id: Option<String>,
    pub entry_name: Option<String>,
    pub position: Option<String>,
    pub change_type: Option<String>,
    pub old_data: Option<String>,
    pub new_data: Option<String>,
    pub source_file_path: Option<String>,
    pub source_line: i64,
    pub dimension_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewChangeLogEntry {
    pub timestamp: String,
    pub player_name: String,
    pub player_uuid: String,
    pub class_name: String,
    pub entry_id: String,
    pub entry_name: String,
    pub position: String,
    pub change_type: String,
    pub old_data: String,
    pub new_data: String,
    pub source_file_path: String,
    pub source_line: i64,
    pub dimension_context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogFilter {
    pub player_uuid: Option<String>,
    pub dimension_context: Option<String>,
    pub entry_id: Option<String>,
    pub change_type: Option<String>,
    pub window: ChangeLogWindow,
    pub order_column: ChangeLogOrderColumn,
    pub direction: SortDirection,
}

impl Default for ChangeLogFilter {
    fn default() -> Self {
        Self {
            player_uuid: None,
            dimension_context: None,
            entry_id: None,
            change_type: None,
            window: ChangeLogWindow::Any,
            order_column: ChangeLogOrderColumn::Timestamp,
            direction: SortDirection::Desc,
        }
    }
}
