use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use backend_domain::{
    AdvancementMap, BalanceEntry, ChangeLogEntry, OnlinePlayer, PlayerIdentity, StatMap,
};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerAdvancementsResponse {
    pub player_uuid: String,
    pub advancements: AdvancementMap,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatsResponse {
    pub player_uuid: String,
    pub stats: StatMap,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeLogDetailResponse {
    pub log: ChangeLogEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub identity: PlayerIdentity,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerNbtResponse {
    pub player_uuid: String,
    pub nbt: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnlinePlayersResponse {
    pub players: Vec<OnlinePlayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub interval_time_ticks: u64,
    pub interval_time_seconds: f64,
    pub server_max_players: i64,
    pub online_player_count: i64,
    pub mtr_logs_total: i64,
    pub stats_total: i64,
    pub advancements_total: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayersDataResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<Vec<BalanceEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, StatMap>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advancements: Option<BTreeMap<String, AdvancementMap>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForceUpdateResponse {
    pub queued: bool,
}

/// `balance_writes` are values the host should apply to the balance objective.
#[derive(Debug, Clone, Serialize)]
pub struct IngestAck {
    pub accepted: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub balance_writes: Vec<BalanceEntry>,
}
