// Per-player advancement and statistic records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub key: String,
    pub value: i64,
}

pub type AdvancementMap = BTreeMap<String, String>;
pub type StatMap = BTreeMap<String, i64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataTotals {
    pub mtr_logs_total: i64,
    pub stats_total: i64,
    pub advancements_total: i64,
}
